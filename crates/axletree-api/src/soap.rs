// SOAP envelope construction and parsing for the AXL service.
//
// Requests are built by hand: the payload is small, the shape is rigid,
// and only the operation element is namespace-qualified (the AXL schema
// declares elementFormDefault="unqualified", so children stay bare).
// Responses are parsed with a streaming quick-xml reader into the
// AxlValue tree; prefixes vary between CUCM releases, so matching is on
// local names throughout.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::auth::SchemaVersion;
use crate::error::Error;
use crate::value::{AxlRecord, AxlValue, FkRef, format_uuid, parse_uuid};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

// ── Request construction ─────────────────────────────────────────────

/// Render a complete request envelope for one AXL operation.
pub(crate) fn request_envelope(
    version: SchemaVersion,
    operation: &str,
    body: &AxlRecord,
) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    out.push_str("<soapenv:Envelope xmlns:soapenv=\"");
    out.push_str(SOAP_ENV_NS);
    out.push_str("\" xmlns:axl=\"");
    out.push_str(&version.namespace());
    out.push_str("\"><soapenv:Header/><soapenv:Body><axl:");
    out.push_str(operation);
    out.push('>');
    for (name, value) in body {
        write_value(&mut out, name, value);
    }
    out.push_str("</axl:");
    out.push_str(operation);
    out.push_str("></soapenv:Body></soapenv:Envelope>");
    out
}

fn write_value(out: &mut String, name: &str, value: &AxlValue) {
    match value {
        AxlValue::Empty => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        AxlValue::Text(text) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            escape_into(out, text);
            close(out, name);
        }
        AxlValue::Fk(fk) => {
            out.push('<');
            out.push_str(name);
            if let Some(uuid) = fk.uuid {
                out.push_str(" uuid=\"");
                out.push_str(&format_uuid(uuid));
                out.push('"');
            }
            match &fk.name {
                Some(text) => {
                    out.push('>');
                    escape_into(out, text);
                    close(out, name);
                }
                None => out.push_str("/>"),
            }
        }
        AxlValue::Node(record) => {
            out.push('<');
            out.push_str(name);
            if let Some(uuid) = record.uuid {
                out.push_str(" uuid=\"");
                out.push_str(&format_uuid(uuid));
                out.push('"');
            }
            if record.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for (child, value) in record {
                    write_value(out, child, value);
                }
                close(out, name);
            }
        }
        // A list is the same element repeated; an empty list writes nothing.
        AxlValue::List(items) => {
            for item in items {
                write_value(out, name, item);
            }
        }
    }
}

fn close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

// ── Response parsing ─────────────────────────────────────────────────

/// Parse a response body: unwrap `Envelope/Body/{op}Response/return` into
/// an [`AxlValue`], or surface `Envelope/Body/Fault` as [`Error::Fault`].
pub(crate) fn parse_response(body: &str) -> Result<AxlValue, Error> {
    parse_inner(body).map_err(|kind| match kind {
        ParseOutcome::Fault(err) => err,
        ParseOutcome::Malformed(message) => Error::Envelope {
            message,
            body: body.to_owned(),
        },
    })
}

enum ParseOutcome {
    Fault(Error),
    Malformed(String),
}

fn parse_inner(body: &str) -> Result<AxlValue, ParseOutcome> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut in_body = false;
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = local_name(&e);
                if !in_body {
                    if name == "Body" {
                        in_body = true;
                    }
                    continue;
                }
                if name == "Fault" {
                    return Err(ParseOutcome::Fault(read_fault(&mut reader, &e)?));
                }
                if name.ends_with("Response") {
                    return read_return(&mut reader);
                }
                return Err(ParseOutcome::Malformed(format!(
                    "unexpected element <{name}> in SOAP body"
                )));
            }
            Event::Empty(e) => {
                if in_body && local_name(&e).ends_with("Response") {
                    return Ok(AxlValue::Empty);
                }
            }
            Event::Eof => {
                return Err(ParseOutcome::Malformed("truncated SOAP envelope".into()));
            }
            _ => {}
        }
    }
}

/// Consume the children of `{op}Response`, returning the parsed `<return>`
/// content. An absent `<return>` is an empty result, not an error.
fn read_return(reader: &mut Reader<&[u8]>) -> Result<AxlValue, ParseOutcome> {
    let mut depth = 0usize;
    let mut result = AxlValue::Empty;
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                if depth == 0 && local_name(&e) == "return" {
                    result = read_element(reader, &e)?;
                } else {
                    depth += 1;
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Ok(result);
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(ParseOutcome::Malformed("truncated SOAP envelope".into()));
            }
            _ => {}
        }
    }
}

/// Recursively read one element's subtree into an [`AxlValue`].
///
/// The caller has consumed the `Start` event; this consumes through the
/// matching `End`. Classification: children make a `Node`, a uuid
/// attribute without children makes an `Fk`, bare text makes `Text`, and
/// nothing (or `xsi:nil`) makes `Empty`.
fn read_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<AxlValue, ParseOutcome> {
    let uuid_attr = attr_uuid(start);
    let nil = attr_nil(start);
    let mut text = String::new();
    let mut record = AxlRecord::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = local_name(&e);
                let value = read_element(reader, &e)?;
                record.push(name, value);
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                record.push(name, empty_element_value(&e));
            }
            Event::Text(t) => {
                text.push_str(&t.unescape().map_err(xml_err)?);
            }
            Event::CData(t) => {
                text.push_str(&String::from_utf8_lossy(t.into_inner().as_ref()));
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(ParseOutcome::Malformed("truncated SOAP envelope".into()));
            }
            _ => {}
        }
    }

    if !record.is_empty() {
        record.uuid = uuid_attr;
        return Ok(AxlValue::Node(record));
    }
    if let Some(uuid) = uuid_attr {
        let name = if text.is_empty() { None } else { Some(text) };
        return Ok(AxlValue::Fk(FkRef { uuid: Some(uuid), name }));
    }
    if nil || text.is_empty() {
        return Ok(AxlValue::Empty);
    }
    Ok(AxlValue::Text(text))
}

fn empty_element_value(e: &BytesStart<'_>) -> AxlValue {
    match attr_uuid(e) {
        Some(uuid) => AxlValue::Fk(FkRef { uuid: Some(uuid), name: None }),
        None => AxlValue::Empty,
    }
}

/// Read the `Fault` subtree into the typed fault error, preferring the
/// `detail/axlError` fields over the generic `faultstring`.
fn read_fault(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Error, ParseOutcome> {
    let Some(fault) = read_element(reader, start)?.as_node().cloned() else {
        return Ok(Error::Fault {
            code: None,
            message: "unspecified SOAP fault".to_owned(),
            request: None,
        });
    };

    let axl_error = fault.node("detail").and_then(|d| d.node("axlError"));
    let code = axl_error
        .and_then(|d| d.text("axlcode"))
        .and_then(|c| c.parse().ok());
    let request = axl_error
        .and_then(|d| d.text("request"))
        .map(str::to_owned);
    let message = axl_error
        .and_then(|d| d.text("axlmessage"))
        .or_else(|| fault.text("faultstring"))
        .unwrap_or("unspecified SOAP fault")
        .to_owned();

    Ok(Error::Fault { code, message, request })
}

// ── Event helpers ────────────────────────────────────────────────────

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attr_uuid(e: &BytesStart<'_>) -> Option<uuid::Uuid> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"uuid" {
            if let Ok(value) = attr.unescape_value() {
                return parse_uuid(&value);
            }
        }
    }
    None
}

fn attr_nil(e: &BytesStart<'_>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"nil"
            && matches!(attr.unescape_value().as_deref(), Ok("true" | "1"))
    })
}

fn xml_err(e: quick_xml::Error) -> ParseOutcome {
    ParseOutcome::Malformed(format!("XML parse error: {e}"))
}
