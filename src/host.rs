//! Headless host: plays the view layer for the engine.
//!
//! The host registers a [`ChannelObserver`], feeds queries to the engine,
//! drives the engine's timers from a blocking loop and renders what a view
//! would show: the instant list and, once ready, the count message.

use crate::model::AppError;
use crate::state::{ChannelObserver, CountMessage, SearchEvent, SearchFilterEngine};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::mpsc::Receiver;
use std::time::Instant;
use tracing::{debug, info};

/// How reports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Entries one per line, then the count message.
    #[default]
    Text,
    /// One JSON object per report.
    Json,
}

/// Everything the view would display for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Query text as typed.
    pub query: String,
    /// Instant filter result, in corpus order.
    pub entries: Vec<String>,
    /// Deferred count, `None` if not submitted or the query was blank.
    pub count: Option<usize>,
}

/// Engine plus the receiving end of its observer channel.
#[derive(Debug)]
pub struct Host {
    engine: SearchFilterEngine,
    events: Receiver<SearchEvent>,
}

impl Host {
    /// Takes ownership of `engine` and registers the host as its observer.
    pub fn new(mut engine: SearchFilterEngine) -> Self {
        let (observer, events) = ChannelObserver::new();
        engine.set_observer(observer);
        Self { engine, events }
    }

    /// The driven engine.
    pub fn engine(&self) -> &SearchFilterEngine {
        &self.engine
    }

    /// Type `query`, optionally click search, and wait for the count.
    pub fn search(&mut self, query: &str, submit: bool) -> SearchReport {
        self.engine.set_query(query);
        let entries = self
            .engine
            .instant_filter()
            .into_iter()
            .map(String::from)
            .collect();

        if submit {
            self.engine.submit_search();
            self.run_timers();
        }

        let mut count = None;
        for event in self.events.try_iter() {
            debug!(?event, "Observer event");
            match event {
                SearchEvent::CountReady(n) => count = Some(n),
                // Text changes and resubmits both supersede the shown count.
                SearchEvent::QueryChanged(_) | SearchEvent::SearchSubmitted(_) => count = None,
            }
        }

        SearchReport {
            query: query.to_string(),
            entries,
            count,
        }
    }

    /// Sleep until each scheduled timer is due and fire it, until none remain.
    fn run_timers(&mut self) {
        while let Some(deadline) = self.engine.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.engine.poll();
        }
    }
}

/// Write one report in the requested format.
///
/// # Errors
///
/// Fails on write errors or JSON serialization errors.
pub fn write_report(
    out: &mut impl Write,
    report: &SearchReport,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            for entry in &report.entries {
                writeln!(out, "{entry}")?;
            }
            if let Some(count) = report.count {
                writeln!(out, "{}", CountMessage(count))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Read queries line by line; each line is typed then submitted.
///
/// The prompt is printed before each line in text mode only, so JSON output
/// stays one object per line. Returns the number of queries handled.
///
/// # Errors
///
/// Fails on read or write errors.
pub fn run_interactive(
    host: &mut Host,
    mut input: impl BufRead,
    mut out: impl Write,
    format: OutputFormat,
    prompt: &str,
) -> Result<usize, AppError> {
    let mut handled = 0;
    let mut line = String::new();

    loop {
        if format == OutputFormat::Text {
            write!(out, "{prompt}> ")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim_end_matches(['\r', '\n']);

        let report = host.search(query, true);
        write_report(&mut out, &report, format)?;
        out.flush()?;
        handled += 1;
    }

    info!(handled, "Interactive session finished");
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Corpus;
    use std::io::Cursor;
    use std::time::Duration;

    fn host() -> Host {
        Host::new(SearchFilterEngine::new(Corpus::shakespeare()).with_delay(Duration::ZERO))
    }

    #[test]
    fn search_without_submit_has_no_count() {
        let mut host = host();
        let report = host.search("death", false);

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.count, None);
        assert!(!host.engine().count_state().is_pending());
    }

    #[test]
    fn search_with_submit_waits_for_count() {
        let mut host = host();
        let report = host.search("die once", true);

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.count, Some(2));
    }

    #[test]
    fn search_with_short_real_delay_still_delivers() {
        let mut host = Host::new(
            SearchFilterEngine::new(Corpus::shakespeare()).with_delay(Duration::from_millis(5)),
        );
        let report = host.search("romeo", true);

        assert_eq!(report.count, Some(1));
    }

    #[test]
    fn blank_submit_reports_full_list_and_no_count() {
        let mut host = host();
        host.search("death", true);
        let report = host.search("   ", true);

        assert_eq!(report.entries.len(), 10);
        assert_eq!(report.count, None);
    }

    #[test]
    fn text_report_lists_entries_then_count() {
        let report = SearchReport {
            query: "romeo".to_string(),
            entries: vec!["‘Romeo, Romeo! wherefore art thou Romeo?’".to_string()],
            count: Some(1),
        };
        let mut out = Vec::new();
        write_report(&mut out, &report, OutputFormat::Text).expect("write");

        insta::assert_snapshot!(String::from_utf8(out).expect("utf8"), @r"
        ‘Romeo, Romeo! wherefore art thou Romeo?’
        1 verse found!
        ");
    }

    #[test]
    fn json_report_is_one_line_per_report() {
        let report = SearchReport {
            query: "romeo juliet".to_string(),
            entries: vec![],
            count: Some(0),
        };
        let mut out = Vec::new();
        write_report(&mut out, &report, OutputFormat::Json).expect("write");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        insta::assert_snapshot!(text.trim_end(), @r#"{"query":"romeo juliet","entries":[],"count":0}"#);
    }

    #[test]
    fn json_report_uses_null_for_missing_count() {
        let report = SearchReport {
            query: String::new(),
            entries: vec!["x".to_string()],
            count: None,
        };
        let value = serde_json::to_value(&report).expect("serialize");
        assert!(value["count"].is_null());
    }

    #[test]
    fn interactive_handles_each_line_as_typed_and_submitted() {
        let mut host = host();
        let input = Cursor::new("death\nromeo juliet\n   \n");
        let mut out = Vec::new();

        let handled = run_interactive(&mut host, input, &mut out, OutputFormat::Text, "Keywords")
            .expect("interactive run");

        assert_eq!(handled, 3);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Keywords> ").count(), 4, "prompt before each read");
        assert!(text.contains("‘Cowards die many times"));
        assert!(text.contains("1 verse found!"));
        assert!(text.contains("0 verse found!"));
        // The blank line lists the whole corpus without a count.
        assert!(text.contains("‘How sharper than a serpent’s tooth"));
        assert_eq!(text.matches("found!").count(), 2);
    }

    #[test]
    fn interactive_json_mode_has_no_prompt() {
        let mut host = host();
        let input = Cursor::new("greatness\r\n");
        let mut out = Vec::new();

        run_interactive(&mut host, input, &mut out, OutputFormat::Json, "ignored")
            .expect("interactive run");

        let text = String::from_utf8(out).expect("utf8");
        assert!(!text.contains("ignored"));
        let value: serde_json::Value = serde_json::from_str(text.trim()).expect("json line");
        assert_eq!(value["query"], "greatness");
        assert_eq!(value["count"], 1);
    }
}
