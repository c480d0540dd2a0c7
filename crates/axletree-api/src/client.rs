// AXL HTTP client
//
// Wraps `reqwest::Client` with AXL-specific URL construction, envelope
// handling, and status triage. The operation families (get/add/update/
// remove/list, SQL, extension mobility) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, SchemaVersion};
use crate::error::Error;
use crate::soap;
use crate::transport::TransportConfig;
use crate::value::{AxlRecord, AxlValue};

/// Everything needed to construct an [`AxlClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub host: String,
    /// AXL runs on the Tomcat HTTPS port, 8443 on every stock install.
    pub port: u16,
    pub version: SchemaVersion,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl ClientSettings {
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port: 8443,
            version: SchemaVersion::default(),
            credentials,
            transport: TransportConfig::default(),
        }
    }
}

/// Raw client for the AXL SOAP service of one CUCM publisher.
///
/// Every operation is a single POST to `/axl/`, authenticated with HTTP
/// Basic auth, awaited to completion. There is no retry, backoff, or
/// pooling here beyond reqwest's own connection reuse; callers that want
/// one shared handle per cluster keep it in `axletree-config`'s registry.
pub struct AxlClient {
    http: reqwest::Client,
    endpoint: Url,
    version: SchemaVersion,
    credentials: Credentials,
}

impl AxlClient {
    /// Create a client from settings.
    ///
    /// If the transport doesn't already include a cookie jar, one is
    /// created automatically: CUCM issues a `JSESSIONIDSSO` cookie that
    /// lets follow-up requests skip credential re-validation.
    pub fn new(settings: &ClientSettings) -> Result<Self, Error> {
        let transport = if settings.transport.cookie_jar.is_some() {
            settings.transport.clone()
        } else {
            settings.transport.clone().with_cookie_jar()
        };
        let http = transport.build_client()?;
        let endpoint = Url::parse(&format!(
            "https://{}:{}/axl/",
            settings.host, settings.port
        ))?;
        Ok(Self {
            http,
            endpoint,
            version: settings.version,
            credentials: settings.credentials.clone(),
        })
    }

    /// Create a client against an explicit endpoint with a pre-built
    /// `reqwest::Client`.
    ///
    /// [`AxlClient::new`] derives the standard `https://{host}:8443/axl/`
    /// endpoint; this constructor exists for tests and for deployments
    /// that front AXL with a reverse proxy.
    pub fn with_endpoint(
        http: reqwest::Client,
        endpoint: Url,
        version: SchemaVersion,
        credentials: Credentials,
    ) -> Self {
        Self { http, endpoint, version, credentials }
    }

    /// The AXL endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The schema version requests are issued against.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Issue one AXL operation and return the parsed `<return>` payload.
    ///
    /// This is the only request primitive; the typed operation families
    /// all funnel through it.
    pub async fn call(&self, operation: &str, body: &AxlRecord) -> Result<AxlValue, Error> {
        let envelope = soap::request_envelope(self.version, operation, body);
        debug!(operation, "AXL request");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(
                self.credentials.username(),
                Some(self.credentials.password()),
            )
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", self.version.soap_action(operation))
            .body(envelope)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "credentials rejected by the AXL service".into(),
            });
        }

        if status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "user lacks the Standard AXL API Access role (HTTP 403)".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        // AXL returns faults with HTTP 500, so the envelope is parsed for
        // success and server-error statuses alike.
        if status.is_success() || status == StatusCode::INTERNAL_SERVER_ERROR {
            return soap::parse_response(&body);
        }

        Err(Error::Envelope {
            message: format!("HTTP {status}: {}", &body[..body.len().min(200)]),
            body,
        })
    }
}
