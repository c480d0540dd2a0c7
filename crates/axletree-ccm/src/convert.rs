// Vendor value conversions.
//
// CUCM spells booleans two ways: "true"/"false" in AXL payloads and
// 't'/'f' in database columns. Keep the two families apart; mixing them
// up writes values Informix will happily store and CUCM will ignore.

/// Interpret an AXL boolean field ("true"/"false", case-insensitive).
pub fn axl_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Render a boolean for a database column.
pub fn sql_bool(value: bool) -> &'static str {
    if value { "t" } else { "f" }
}

/// Interpret a database boolean column.
pub fn parse_sql_bool(value: &str) -> bool {
    value == "t"
}
