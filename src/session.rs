use std::io::{BufWriter, Read, Write};

use log::{debug, info};
use serde_json::Deserializer;

use crate::common::{Request, Response};
use crate::tracker::InventoryTracker;
use crate::{InventoryError, Result};

/// Runs `Request`s against an owned `InventoryTracker`.
///
/// A session is local to the process: requests come from any reader,
/// typically a script file or stdin.
#[derive(Debug, Default)]
pub struct Session {
    tracker: InventoryTracker,
}

impl Session {
    /// Creates a session over an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over an existing tracker.
    pub fn with_tracker(tracker: InventoryTracker) -> Self {
        Self { tracker }
    }

    /// Borrows the underlying tracker.
    pub fn tracker(&self) -> &InventoryTracker {
        &self.tracker
    }

    /// Consumes the session, returning its tracker.
    pub fn into_tracker(self) -> InventoryTracker {
        self.tracker
    }

    /// Executes a single request.
    pub fn apply(&mut self, request: Request) -> Response {
        match request {
            Request::Add {
                name,
                quantity,
                price,
            } => {
                self.tracker.add_item(name, quantity, price);
                Response::Added
            }
            Request::Remove { name, quantity } => {
                Response::Removed(self.tracker.remove_item(&name, quantity))
            }
            Request::Total => Response::Total(self.tracker.total()),
            Request::MostExpensive => {
                Response::MostExpensive(self.tracker.most_expensive().map(str::to_owned))
            }
            Request::LowStock { threshold } => match u64::try_from(threshold) {
                Ok(threshold) => Response::LowStock(self.tracker.low_stock(threshold)),
                Err(_) => Response::LowStock(Vec::new()),
            },
        }
    }

    /// Reads a stream of JSON requests from `reader`, writing one JSON
    /// response line per request to `writer`.
    ///
    /// Returns the number of requests processed. Stops at the first
    /// malformed request, or at a total that JSON cannot represent.
    pub fn run<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<usize> {
        let mut writer = BufWriter::new(writer);
        let requests = Deserializer::from_reader(reader).into_iter::<Request>();
        let mut processed = 0;

        for request in requests {
            let request = request?;
            debug!("Received request: {:?}", request);

            let response = self.apply(request);
            if let Response::Total(total) = &response {
                if !total.is_finite() {
                    return Err(InventoryError::StringError(format!(
                        "Total {} is not representable in JSON",
                        total
                    )));
                }
            }
            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            processed += 1;
        }

        info!(
            "Processed {} requests, {} items tracked",
            processed,
            self.tracker.len()
        );
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemRecord;

    fn run_script(script: &str) -> (Session, Result<usize>, String) {
        let mut session = Session::new();
        let mut out = Vec::new();
        let result = session.run(script.as_bytes(), &mut out);
        (session, result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn apply_maps_each_request() {
        let mut session = Session::new();
        assert_eq!(
            session.apply(Request::Add {
                name: "apple".to_owned(),
                quantity: 2,
                price: 1.5,
            }),
            Response::Added
        );
        assert_eq!(session.apply(Request::Total), Response::Total(3.0));
        assert_eq!(
            session.apply(Request::MostExpensive),
            Response::MostExpensive(Some("apple".to_owned()))
        );
        assert_eq!(
            session.apply(Request::LowStock { threshold: 2 }),
            Response::LowStock(vec!["apple".to_owned()])
        );
        assert_eq!(
            session.apply(Request::Remove {
                name: "pear".to_owned(),
                quantity: 1,
            }),
            Response::Removed(false)
        );
        assert_eq!(
            session.apply(Request::Remove {
                name: "apple".to_owned(),
                quantity: 2,
            }),
            Response::Removed(true)
        );
        assert!(session.into_tracker().is_empty());
    }

    #[test]
    fn run_writes_one_line_per_request() {
        let script = r#"
            {"Add":{"name":"apple","quantity":50,"price":0.75}}
            {"Add":{"name":"banana","quantity":30,"price":1.25}}
            {"Add":{"name":"apple","quantity":10,"price":0.80}}
            "MostExpensive"
            {"Remove":{"name":"banana","quantity":25}}
            {"LowStock":{"threshold":10}}
            {"Remove":{"name":"banana","quantity":10}}
            {"LowStock":{"threshold":10}}
        "#;
        let (session, result, out) = run_script(script);

        assert_eq!(result.unwrap(), 8);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#""Added""#,
                r#""Added""#,
                r#""Added""#,
                r#"{"MostExpensive":"banana"}"#,
                r#"{"Removed":true}"#,
                r#"{"LowStock":["banana"]}"#,
                r#"{"Removed":true}"#,
                r#"{"LowStock":[]}"#,
            ]
        );
        assert_eq!(session.tracker().len(), 1);
    }

    #[test]
    fn run_reports_total() {
        let script = r#"{"Add":{"name":"x","quantity":10,"price":1.0}}
            {"Add":{"name":"x","quantity":5,"price":2.0}}
            "Total""#;
        let (_, result, out) = run_script(script);

        assert_eq!(result.unwrap(), 3);
        let last: Response = serde_json::from_str(out.lines().last().unwrap()).unwrap();
        match last {
            Response::Total(total) => assert!((total - 30.0).abs() < 1e-3),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn run_stops_at_malformed_request() {
        let script = r#"{"Add":{"name":"apple","quantity":1,"price":1.0}} {"Restock":{}} "Total""#;
        let (session, result, out) = run_script(script);

        assert!(matches!(result, Err(InventoryError::Serde(_))));
        assert_eq!(out, "\"Added\"\n");
        assert_eq!(session.tracker().len(), 1);
    }

    #[test]
    fn run_empty_input() {
        let (session, result, out) = run_script("");
        assert_eq!(result.unwrap(), 0);
        assert!(out.is_empty());
        assert!(session.tracker().is_empty());
    }

    #[test]
    fn run_rejects_non_finite_total() {
        let script = r#"{"Add":{"name":"a","quantity":18446744073709551615,"price":1e308}}
            "Total""#;
        let (session, result, out) = run_script(script);

        assert!(matches!(result, Err(InventoryError::StringError(_))));
        assert_eq!(out, "\"Added\"\n");
        for line in out.lines() {
            serde_json::from_str::<Response>(line).unwrap();
        }
        assert_eq!(session.tracker().len(), 1);
    }

    #[test]
    fn low_stock_negative_threshold_is_empty() {
        let script = r#"{"Add":{"name":"apple","quantity":0,"price":1.0}}
            {"LowStock":{"threshold":-1}}
            {"LowStock":{"threshold":0}}"#;
        let (_, result, out) = run_script(script);

        assert_eq!(result.unwrap(), 3);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], r#"{"LowStock":[]}"#);
        assert_eq!(lines[2], r#"{"LowStock":["apple"]}"#);
    }

    #[test]
    fn run_over_seeded_tracker() {
        let mut tracker = InventoryTracker::new();
        tracker.add_item("apple", 50, 0.75);
        tracker.add_item("banana", 30, 1.25);

        let mut session = Session::with_tracker(tracker);
        let script = r#"{"Add":{"name":"apple","quantity":10,"price":0.80}}
            {"Remove":{"name":"banana","quantity":25}}
            "MostExpensive""#;
        let mut out = Vec::new();
        assert_eq!(session.run(script.as_bytes(), &mut out).unwrap(), 3);
        assert!(String::from_utf8(out)
            .unwrap()
            .ends_with("{\"MostExpensive\":\"banana\"}\n"));

        let tracker = session.into_tracker();
        assert_eq!(
            tracker.get("apple"),
            Some(&ItemRecord {
                quantity: 60,
                price: 0.80
            })
        );
        assert_eq!(tracker.get("banana").map(|r| r.quantity), Some(5));
        assert!((tracker.total() - 54.25).abs() < 1e-3);
    }
}
