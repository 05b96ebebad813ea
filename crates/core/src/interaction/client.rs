use std::time::Duration;

use super::types::AnalysisReport;
use crate::catalog::Drug;
use crate::config::CoreConfig;
use crate::error::AnalysisError;
use crate::{PharmaError, PharmaResult};

/// The remote drug search and interaction analysis service.
pub trait InteractionService {
    /// Drugs matching `term`. Failures degrade to an empty list.
    fn search(&self, term: &str) -> Vec<Drug>;

    /// Interaction analysis of `drugs`.
    fn analyze(&self, drugs: &[Drug]) -> Result<AnalysisReport, AnalysisError>;
}

/// Blocking HTTP client for the search/analysis service.
pub struct HttpInteractionService {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpInteractionService {
    pub fn new(cfg: &CoreConfig) -> PharmaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(cfg.http_timeout())
            .build()
            .map_err(PharmaError::HttpClient)?;

        Ok(Self {
            base_url: cfg.api_base_url().to_string(),
            client,
            timeout: cfg.http_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            tracing::warn!(
                "analysis request timed out after {}s",
                self.timeout.as_secs()
            );
        } else {
            tracing::warn!("analysis request failed: {e}");
        }
        AnalysisError::ServerUnreachable(self.base_url.clone())
    }
}

impl InteractionService for HttpInteractionService {
    fn search(&self, term: &str) -> Vec<Drug> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/api/search", self.base_url);
        let response = match self.client.get(&url).query(&[("q", term)]).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("search request failed: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("search returned status {}", status.as_u16());
            return Vec::new();
        }

        response.json::<Vec<Drug>>().unwrap_or_else(|e| {
            tracing::warn!("failed to parse search response: {e}");
            Vec::new()
        })
    }

    fn analyze(&self, drugs: &[Drug]) -> Result<AnalysisReport, AnalysisError> {
        let url = format!("{}/api/analyze", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(drugs)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("analysis returned status {}", status.as_u16());
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<AnalysisReport>()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Substance;
    use crate::interaction::GlobalSeverity;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::thread::{self, JoinHandle};

    fn service_at(base_url: &str) -> HttpInteractionService {
        let cfg = CoreConfig::new(
            PathBuf::from("data"),
            base_url,
            2,
            PathBuf::from("selection.json"),
        )
        .unwrap();
        HttpInteractionService::new(&cfg).unwrap()
    }

    fn unreachable_service() -> HttpInteractionService {
        // Port 9 (discard) on localhost is closed in test environments.
        service_at("http://127.0.0.1:9")
    }

    /// Serves one canned HTTP response on a local port and hands back the request line.
    fn serve_once(status: &str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let status = status.to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            request_line.trim().to_string()
        });

        (base_url, handle)
    }

    fn doliprane() -> Drug {
        Drug {
            cis: "60234100".into(),
            nom: "DOLIPRANE 500 mg".into(),
            substances: vec![Substance {
                code_substance: "02202".into(),
                nom: "PARACÉTAMOL".into(),
                dosage: "500 mg".into(),
            }],
        }
    }

    #[test]
    fn search_degrades_to_empty_when_unreachable() {
        let service = unreachable_service();
        assert!(service.search("doliprane").is_empty());
    }

    #[test]
    fn blank_search_does_not_hit_the_network() {
        let service = unreachable_service();
        assert!(service.search("  ").is_empty());
    }

    #[test]
    fn analyze_reports_server_unreachable() {
        let service = unreachable_service();
        let err = service.analyze(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::ServerUnreachable(_)));
        assert_eq!(
            err.user_message(),
            "Impossible de joindre le serveur d'analyse."
        );
    }

    #[test]
    fn search_parses_matching_drugs() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"cis":"60234100","nom":"DOLIPRANE 500 mg","substances":[{"code_substance":"02202","nom":"PARACÉTAMOL","dosage":"500 mg"}]}]"#,
        );

        let drugs = service_at(&base_url).search("doli");
        assert_eq!(drugs, vec![doliprane()]);

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /api/search?q=doli "));
    }

    #[test]
    fn search_degrades_to_empty_on_server_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#);
        assert!(service_at(&base_url).search("doliprane").is_empty());
        server.join().unwrap();
    }

    #[test]
    fn search_degrades_to_empty_on_unparsable_body() {
        let (base_url, server) = serve_once("200 OK", "not json");
        assert!(service_at(&base_url).search("doliprane").is_empty());
        server.join().unwrap();
    }

    #[test]
    fn analyze_parses_report() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"interaction_detected":true,"global_severity":"Rouge","explanation":"Risque majeur","conduct_to_follow":"Ne pas associer","technical_details":[{"molecule_a":"PARACETAMOL","molecule_b":"WARFARINE","level_risk":"PE","risk":"Hausse de l'INR"}]}"#,
        );

        let report = service_at(&base_url)
            .analyze(&[doliprane(), doliprane()])
            .unwrap();
        assert!(report.interaction_detected);
        assert_eq!(report.global_severity, Some(GlobalSeverity::Rouge));
        assert_eq!(report.technical_details.len(), 1);
        assert_eq!(
            report.technical_details[0].level_label(),
            "Précaution d'emploi"
        );

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("POST /api/analyze "));
    }

    #[test]
    fn analyze_maps_error_status_to_static_message() {
        let (base_url, server) = serve_once("503 Service Unavailable", "{}");

        let err = service_at(&base_url).analyze(&[doliprane()]).unwrap_err();
        assert!(matches!(err, AnalysisError::Status { status: 503 }));
        assert_eq!(
            err.user_message(),
            "Impossible de joindre le serveur d'analyse."
        );
        server.join().unwrap();
    }

    #[test]
    fn analyze_reports_unparsable_body() {
        let (base_url, server) = serve_once("200 OK", "not json");

        let err = service_at(&base_url).analyze(&[doliprane()]).unwrap_err();
        assert!(matches!(err, AnalysisError::ResponseParsing(_)));
        assert_eq!(
            err.user_message(),
            "Impossible de joindre le serveur d'analyse."
        );
        server.join().unwrap();
    }
}
