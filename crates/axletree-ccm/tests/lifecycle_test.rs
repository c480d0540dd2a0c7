#![allow(clippy::unwrap_used)]
// Integration tests for the attachment lifecycle against a mocked AXL
// endpoint: attach on load, dirty tracking through update, detach on
// remove, and the SQL-backed relationship helpers.

use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use axletree_api::value::parse_uuid;
use axletree_api::{AxlClient, Credentials, SchemaVersion};
use axletree_ccm::model::{
    DeviceProfile, Line, Phone, RemoteDestination, RemoteDestinationProfile, TimeSchedule, User,
};
use axletree_ccm::{AxlRecord, CcmError, ListQuery, SqlUtils};

const PHONE_UUID: &str = "{3B1A2C4D-9F00-4E5A-8B1C-0D2E3F4A5B6C}";
const LINE_UUID: &str = "{11112222-3333-4444-5555-666677778888}";
const USER_UUID: &str = "{AABBCCDD-0000-0000-0000-000000000009}";
const PERIOD_UUID: &str = "{AABBCCDD-0000-0000-0000-00000000000A}";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, AxlClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/axl/", server.uri())).unwrap();
    let client = AxlClient::with_endpoint(
        reqwest::Client::new(),
        endpoint,
        SchemaVersion::V12_5,
        Credentials::new("axladmin", "secret"),
    );
    (server, client)
}

fn axl_response(operation: &str, inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soapenv:Body>\
         <ns:{operation}Response xmlns:ns=\"http://www.cisco.com/AXL/API/12.5\">\
         {inner}\
         </ns:{operation}Response>\
         </soapenv:Body>\
         </soapenv:Envelope>"
    )
}

fn axl_fault(code: i64, message: &str, request: &str) -> String {
    format!(
        "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soapenv:Body><soapenv:Fault>\
         <faultcode>soapenv:Client</faultcode>\
         <faultstring>{message}</faultstring>\
         <detail><axlError>\
         <axlcode>{code}</axlcode>\
         <axlmessage>{message}</axlmessage>\
         <request>{request}</request>\
         </axlError></detail>\
         </soapenv:Fault></soapenv:Body></soapenv:Envelope>"
    )
}

fn xml_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/xml;charset=UTF-8")
        .set_body_string(body)
}

fn soap_action(operation: &str) -> String {
    format!("\"CUCM:DB ver=12.5 {operation}\"")
}

async fn mock_get_phone(server: &MockServer) {
    let inner = format!(
        "<return><phone uuid=\"{PHONE_UUID}\">\
         <name>SEP001122334455</name>\
         <description>lobby</description>\
         </phone></return>"
    );
    Mock::given(method("POST"))
        .and(path("/axl/"))
        .and(header("SOAPAction", soap_action("getPhone")))
        .respond_with(xml_response(axl_response("getPhone", &inner)))
        .mount(server)
        .await;
}

// ── attach / update / remove ────────────────────────────────────────

#[tokio::test]
async fn test_load_attaches_without_dirtying() {
    let (server, client) = setup().await;
    mock_get_phone(&server).await;

    let criteria = AxlRecord::new().with("name", "SEP001122334455");
    let phone = Phone::get(&client, &criteria).await.unwrap();

    assert!(phone.is_attached());
    assert_eq!(phone.uuid(), parse_uuid(PHONE_UUID));
    assert_eq!(phone.text("description"), Some("lobby"));
    assert!(phone.pending().is_empty());
}

#[tokio::test]
async fn test_update_sends_only_tracked_fields_under_renamed_tags() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><line uuid=\"{LINE_UUID}\">\
         <pattern>2000</pattern>\
         <description>old</description>\
         </line></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getLine")))
        .respond_with(xml_response(axl_response("getLine", &inner)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("updateLine")))
        .and(body_string_contains(format!("<uuid>{LINE_UUID}</uuid>")))
        .and(body_string_contains("<newPattern>2001</newPattern>"))
        .and(body_string_contains("<description>moved</description>"))
        .respond_with(xml_response(axl_response(
            "updateLine",
            &format!("<return>{LINE_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("pattern", "2000");
    let mut line = Line::get(&client, &criteria).await.unwrap();
    line.set("pattern", "2001");
    line.set("description", "moved");

    line.update(&client).await.unwrap();
    assert!(line.pending().is_empty());
    assert_eq!(line.text("pattern"), Some("2001"));
}

#[tokio::test]
async fn test_update_on_detached_object_fails_locally() {
    let (_server, client) = setup().await;

    let mut line = Line::with_pattern("1000", None);
    let err = line.update(&client).await.unwrap_err();

    match err {
        CcmError::NotAttached { entity, action } => {
            assert_eq!(entity, "Line");
            assert_eq!(action, "update");
        }
        other => panic!("expected NotAttached, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_assigns_uuid_and_rejects_a_second_create() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("addLine")))
        .and(body_string_contains("<axl:addLine><line>"))
        .and(body_string_contains("<pattern>1000</pattern>"))
        .and(body_string_contains("<usage>Device</usage>"))
        .respond_with(xml_response(axl_response(
            "addLine",
            &format!("<return>{LINE_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let mut line = Line::with_pattern("1000", None);
    let uuid = line.create(&client).await.unwrap();

    assert_eq!(Some(uuid), parse_uuid(LINE_UUID));
    assert!(line.is_attached());
    assert!(line.pending().is_empty());

    let err = line.create(&client).await.unwrap_err();
    assert!(matches!(err, CcmError::AlreadyAttached { entity: "Line", .. }));
}

#[tokio::test]
async fn test_remove_detaches_and_keeps_the_local_record() {
    let (server, client) = setup().await;
    mock_get_phone(&server).await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("removePhone")))
        .and(body_string_contains(format!("<uuid>{PHONE_UUID}</uuid>")))
        .respond_with(xml_response(axl_response(
            "removePhone",
            &format!("<return>{PHONE_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("name", "SEP001122334455");
    let mut phone = Phone::get(&client, &criteria).await.unwrap();
    phone.remove(&client).await.unwrap();

    assert!(!phone.is_attached());
    assert_eq!(phone.uuid(), None);
    assert_eq!(phone.text("name"), Some("SEP001122334455"));

    let err = phone.remove(&client).await.unwrap_err();
    assert!(matches!(err, CcmError::NotAttached { .. }));
}

#[tokio::test]
async fn test_reload_discards_tracked_changes() {
    let (server, client) = setup().await;
    mock_get_phone(&server).await;

    let criteria = AxlRecord::new().with("name", "SEP001122334455");
    let mut phone = Phone::get(&client, &criteria).await.unwrap();
    phone.set("description", "scratch");
    assert_eq!(phone.pending().len(), 1);

    phone.reload(&client).await.unwrap();

    assert!(phone.pending().is_empty());
    assert_eq!(phone.text("description"), Some("lobby"));
    assert_eq!(phone.uuid(), parse_uuid(PHONE_UUID));
}

#[tokio::test]
async fn test_reset_fault_propagates() {
    let (server, client) = setup().await;
    mock_get_phone(&server).await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("resetPhone")))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(axl_fault(5003, "Reset failed", "resetPhone")),
        )
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("name", "SEP001122334455");
    let phone = Phone::get(&client, &criteria).await.unwrap();
    let err = phone.reset(&client).await.unwrap_err();

    match err {
        CcmError::Reset { entity, ref source } => {
            assert_eq!(entity, "Phone");
            assert_eq!(source.fault_code(), Some(5003));
        }
        other => panic!("expected Reset, got: {other:?}"),
    }
}

// ── list / template ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_objects_loads_each_row_by_uuid() {
    let (server, client) = setup().await;

    let rows = "<return>\
         <phone uuid=\"{AABBCCDD-0000-0000-0000-000000000001}\"><name>SEP-A</name></phone>\
         <phone uuid=\"{AABBCCDD-0000-0000-0000-000000000002}\"><name>SEP-B</name></phone>\
         </return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("listPhone")))
        .and(body_string_contains("<searchCriteria><name>SEP%</name></searchCriteria>"))
        .and(body_string_contains("<returnedTags><name/></returnedTags>"))
        .respond_with(xml_response(axl_response("listPhone", rows)))
        .mount(&server)
        .await;

    for (uuid, name) in [
        ("{AABBCCDD-0000-0000-0000-000000000001}", "SEP-A"),
        ("{AABBCCDD-0000-0000-0000-000000000002}", "SEP-B"),
    ] {
        let inner = format!(
            "<return><phone uuid=\"{uuid}\"><name>{name}</name></phone></return>"
        );
        Mock::given(method("POST"))
            .and(header("SOAPAction", soap_action("getPhone")))
            .and(body_string_contains(format!("<uuid>{uuid}</uuid>")))
            .respond_with(xml_response(axl_response("getPhone", &inner)))
            .mount(&server)
            .await;
    }

    let query = ListQuery::new().criterion("name", "SEP%");
    let phones = Phone::list_objects(&client, &query).await.unwrap();

    assert_eq!(phones.len(), 2);
    assert!(phones.iter().all(Phone::is_attached));
    assert_eq!(phones[0].text("name"), Some("SEP-A"));
    assert_eq!(phones[1].text("name"), Some("SEP-B"));
}

#[tokio::test]
async fn test_template_clone_carries_the_device_class() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><remoteDestinationProfile uuid=\"{PHONE_UUID}\">\
         <name>RDP-TEMPLATE</name>\
         <devicePoolName>DP-HQ</devicePoolName>\
         </remoteDestinationProfile></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getRemoteDestinationProfile")))
        .respond_with(xml_response(axl_response("getRemoteDestinationProfile", &inner)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("addRemoteDestinationProfile")))
        .and(body_string_contains("<name>RDP-JDOE</name>"))
        .and(body_string_contains("<class>Remote Destination Profile</class>"))
        .respond_with(xml_response(axl_response(
            "addRemoteDestinationProfile",
            &format!("<return>{USER_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("name", "RDP-TEMPLATE");
    let mut profile = RemoteDestinationProfile::template(&client, &criteria)
        .await
        .unwrap();

    assert!(!profile.is_attached());
    assert_eq!(profile.text("class"), Some("Remote Destination Profile"));

    profile.set("name", "RDP-JDOE");
    let uuid = profile.create(&client).await.unwrap();
    assert_eq!(Some(uuid), parse_uuid(USER_UUID));
}

// ── entity behaviors ────────────────────────────────────────────────

#[tokio::test]
async fn test_schedule_members_travel_as_references() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><timeSchedule uuid=\"{PHONE_UUID}\">\
         <name>BUSINESS-HOURS</name>\
         </timeSchedule></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getTimeSchedule")))
        .respond_with(xml_response(axl_response("getTimeSchedule", &inner)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("updateTimeSchedule")))
        .and(body_string_contains(format!("<uuid>{PHONE_UUID}</uuid>")))
        .and(body_string_contains(format!(
            "<addMembers><member><timePeriodName uuid=\"{PERIOD_UUID}\"/></member></addMembers>"
        )))
        .respond_with(xml_response(axl_response(
            "updateTimeSchedule",
            &format!("<return>{PHONE_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("name", "BUSINESS-HOURS");
    let schedule = TimeSchedule::get(&client, &criteria).await.unwrap();
    let period = parse_uuid(PERIOD_UUID).unwrap();

    schedule.add_members(&client, &[period]).await.unwrap();
    assert!(!schedule.record().contains("addMembers"));
}

#[tokio::test]
async fn test_presence_license_insert_path() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><user uuid=\"{USER_UUID}\"><userid>jdoe</userid></user></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getUser")))
        .respond_with(xml_response(axl_response("getUser", &inner)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("FROM enduserlicense"))
        .respond_with(xml_response(axl_response("executeSQLQuery", "")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLUpdate")))
        .and(body_string_contains("INSERT INTO enduserlicense"))
        .and(body_string_contains("aabbccdd-0000-0000-0000-000000000009"))
        .respond_with(xml_response(axl_response(
            "executeSQLUpdate",
            "<return><rowsUpdated>1</rowsUpdated></return>",
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("userid", "jdoe");
    let user = User::get(&client, &criteria).await.unwrap();

    assert_eq!(user.presence_license(&client).await.unwrap(), None);
    user.set_presence_license(&client, true, false).await.unwrap();
}

#[tokio::test]
async fn test_presence_license_update_reenables_a_disabled_row() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><user uuid=\"{USER_UUID}\"><userid>jdoe</userid></user></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getUser")))
        .respond_with(xml_response(axl_response("getUser", &inner)))
        .mount(&server)
        .await;

    let rows = "<return><row>\
         <enablecups>f</enablecups>\
         <enablecupc>f</enablecupc>\
         </row></return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("FROM enduserlicense"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLUpdate")))
        .and(body_string_contains("UPDATE enduserlicense"))
        .and(body_string_contains("enablecups = &quot;t&quot;"))
        .and(body_string_contains("enablecupc = &quot;t&quot;"))
        .respond_with(xml_response(axl_response(
            "executeSQLUpdate",
            "<return><rowsUpdated>1</rowsUpdated></return>",
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("userid", "jdoe");
    let user = User::get(&client, &criteria).await.unwrap();

    assert_eq!(user.presence_license(&client).await.unwrap(), Some((false, false)));
    user.set_presence_license(&client, true, true).await.unwrap();
}

#[tokio::test]
async fn test_line_associated_devices_reads_the_device_map() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><line uuid=\"{LINE_UUID}\"><pattern>1000</pattern></line></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getLine")))
        .respond_with(xml_response(axl_response("getLine", &inner)))
        .mount(&server)
        .await;

    let rows = "<return><row>\
         <name>SEP001122334455</name>\
         <pkid>3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c</pkid>\
         <dn>1000</dn>\
         </row></return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("FROM device AS d, numplan AS n, devicenumplanmap AS dnpm"))
        .and(body_string_contains("11112222-3333-4444-5555-666677778888"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("pattern", "1000");
    let line = Line::get(&client, &criteria).await.unwrap();
    let devices = line.associated_devices(&client).await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "SEP001122334455");
    assert_eq!(devices[0].pattern, "1000");
}

#[tokio::test]
async fn test_extension_mobility_login_references_devices_by_uuid() {
    let (server, client) = setup().await;
    mock_get_phone(&server).await;

    let profile_inner = format!(
        "<return><deviceProfile uuid=\"{USER_UUID}\">\
         <name>UDP-JDOE</name>\
         </deviceProfile></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getDeviceProfile")))
        .respond_with(xml_response(axl_response("getDeviceProfile", &profile_inner)))
        .mount(&server)
        .await;

    let user_inner = format!(
        "<return><user uuid=\"{LINE_UUID}\"><userid>jdoe</userid></user></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getUser")))
        .respond_with(xml_response(axl_response("getUser", &user_inner)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("doDeviceLogin")))
        .and(body_string_contains(format!("<deviceName uuid=\"{PHONE_UUID}\"/>")))
        .and(body_string_contains("<loginDuration>8</loginDuration>"))
        .and(body_string_contains(format!("<profileName uuid=\"{USER_UUID}\"/>")))
        .and(body_string_contains("<userId>jdoe</userId>"))
        .respond_with(xml_response(axl_response(
            "doDeviceLogin",
            &format!("<return>{PHONE_UUID}</return>"),
        )))
        .mount(&server)
        .await;

    let phone = Phone::get(&client, &AxlRecord::new().with("name", "SEP001122334455"))
        .await
        .unwrap();
    let profile = DeviceProfile::get(&client, &AxlRecord::new().with("name", "UDP-JDOE"))
        .await
        .unwrap();
    let user = User::get(&client, &AxlRecord::new().with("userid", "jdoe"))
        .await
        .unwrap();

    phone.login(&client, &user, &profile, 8).await.unwrap();
}

#[tokio::test]
async fn test_single_number_reach_round_trip() {
    let (server, client) = setup().await;

    let inner = format!(
        "<return><remoteDestination uuid=\"{USER_UUID}\">\
         <destination>+41791234567</destination>\
         </remoteDestination></return>"
    );
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("getRemoteDestination")))
        .respond_with(xml_response(axl_response("getRemoteDestination", &inner)))
        .mount(&server)
        .await;

    let rows = "<return><row>\
         <enablesinglenumberreach>t</enablesinglenumberreach>\
         </row></return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("FROM remotedestinationdynamic"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLUpdate")))
        .and(body_string_contains("UPDATE remotedestinationdynamic"))
        .and(body_string_contains("enablesinglenumberreach = &quot;f&quot;"))
        .respond_with(xml_response(axl_response(
            "executeSQLUpdate",
            "<return><rowsUpdated>1</rowsUpdated></return>",
        )))
        .mount(&server)
        .await;

    let criteria = AxlRecord::new().with("destination", "+41791234567");
    let destination = RemoteDestination::get(&client, &criteria).await.unwrap();

    assert!(destination.single_number_reach(&client).await.unwrap());
    destination.set_single_number_reach(&client, false).await.unwrap();
}

// ── SQL utilities ───────────────────────────────────────────────────

#[tokio::test]
async fn test_bfcp_toggle_updates_the_device_row() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLUpdate")))
        .and(body_string_contains("UPDATE device SET enablebfcp = &quot;t&quot;"))
        .and(body_string_contains("pkid = &quot;3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c&quot;"))
        .respond_with(xml_response(axl_response(
            "executeSQLUpdate",
            "<return><rowsUpdated>1</rowsUpdated></return>",
        )))
        .mount(&server)
        .await;

    let device = parse_uuid(PHONE_UUID).unwrap();
    let rows = SqlUtils::new(&client).set_bfcp(device, true).await.unwrap();

    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_assigned_numbers_report_decodes_pattern_and_partition() {
    let (server, client) = setup().await;

    let rows = "<return>\
         <row><dn>1000</dn><name>internal</name></row>\
         <row><dn>2000</dn><name>dmz</name></row>\
         </return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("FROM numplan n, routepartition r"))
        .and(body_string_contains("GROUP BY dn ORDER BY dn"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    let numbers = SqlUtils::new(&client).assigned_directory_numbers().await.unwrap();

    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers[0].pattern, "1000");
    assert_eq!(numbers[0].partition, "internal");
    assert_eq!(numbers[1].pattern, "2000");
    assert_eq!(numbers[1].partition, "dmz");
}

#[tokio::test]
async fn test_self_service_lookup_wraps_the_fragment_in_wildcards() {
    let (server, client) = setup().await;

    let rows = "<return>\
         <row><userid>jdoe</userid></row>\
         <row><userid>jsmith</userid></row>\
         </return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("LIKE &quot;%4100%&quot;"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    let users = SqlUtils::new(&client)
        .users_with_self_service_id("4100")
        .await
        .unwrap();

    assert_eq!(users, ["jdoe", "jsmith"]);
}

#[tokio::test]
async fn test_inactive_numbers_come_back_as_uuids() {
    let (server, client) = setup().await;

    let rows = "<return>\
         <row><pkid>11112222-3333-4444-5555-666677778888</pkid></row>\
         </return>";
    Mock::given(method("POST"))
        .and(header("SOAPAction", soap_action("executeSQLQuery")))
        .and(body_string_contains("LEFT OUTER JOIN devicenumplanmap"))
        .respond_with(xml_response(axl_response("executeSQLQuery", rows)))
        .mount(&server)
        .await;

    let inactive = SqlUtils::new(&client)
        .inactive_directory_numbers()
        .await
        .unwrap();

    assert_eq!(inactive.len(), 1);
    assert_eq!(Some(inactive[0]), parse_uuid(LINE_UUID));
}
