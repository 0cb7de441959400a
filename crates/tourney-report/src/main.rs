mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use report_core::formatting::format_currency;
use report_core::settings::Settings;
use report_data::analysis::{analyze_paths, ErrorPayload, Report};

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Tourney Report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Inputs: {:?}", settings.inputs);

    match analyze_paths(&settings.inputs) {
        Ok(report) => {
            if settings.wants_summary() {
                print!("{}", render_summary(&report));
            } else {
                println!("{}", to_json(&report, settings.pretty)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!("Failed to load input: {}", err);
            let payload = ErrorPayload::from(&err);
            println!("{}", to_json(&payload, settings.pretty)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> report_core::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Plain-text overview: batch totals followed by one line per fee tier.
fn render_summary(report: &Report) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!("Tournaments:  {}\n", report.total_records));
    out.push_str(&format!("Buy-ins:      {}\n", format_currency(summary.total_buy_ins)));
    out.push_str(&format!("Winnings:     {}\n", format_currency(summary.total_payout)));
    out.push_str(&format!("Net profit:   {}\n", format_currency(summary.net_profit)));
    out.push_str(&format!(
        "Cashes:       {} ({:.2}%)\n",
        summary.count_with_payout, summary.win_rate
    ));
    out.push_str(&format!("ROI:          {:.2}%\n", summary.roi));

    if !report.categories.is_empty() {
        out.push('\n');
        for bucket in report.categories.iter() {
            out.push_str(&format!(
                "{:>10}  x{:<4} buy-ins {:>12}  winnings {:>12}  net {:>12}  roi {:>8.2}%\n",
                bucket.key,
                bucket.count,
                format_currency(bucket.total_buy_in),
                format_currency(bucket.total_winnings),
                format_currency(bucket.net_profit()),
                bucket.roi(),
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_data::analysis::analyze_texts;

    const EXPORT: &str = "Tournament #1, Hot $5, Hold'em No Limit\n\
                          Buy-in: $4.50 + $0.50\n\
                          100 Players\n\
                          3rd : Hero\n\
                          received a total of $1,204.00\n\
                          ----\n\
                          Tournament #2, Daily $22, Hold'em No Limit\n\
                          Buy-in: $20.00 + $2.00\n\
                          300 Players\n\
                          ----\n";

    #[test]
    fn test_render_summary_totals() {
        let report = analyze_texts([EXPORT]);
        let text = render_summary(&report);

        assert!(text.contains("Tournaments:  2"));
        assert!(text.contains("Buy-ins:      $27.00"));
        assert!(text.contains("Winnings:     $1,204.00"));
        assert!(text.contains("Net profit:   $1,177.00"));
        assert!(text.contains("Cashes:       1 (50.00%)"));
    }

    #[test]
    fn test_render_summary_tiers_in_order() {
        let report = analyze_texts([EXPORT]);
        let text = render_summary(&report);

        let five = text.find("$5.00").unwrap();
        let twenty_two = text.find("$22.00").unwrap();
        assert!(five < twenty_two);
        assert!(text.contains("$-22.00"));
    }

    #[test]
    fn test_render_summary_empty() {
        let report = analyze_texts(Vec::<&str>::new());
        let text = render_summary(&report);
        assert!(text.contains("Tournaments:  0"));
        assert!(text.contains("Net profit:   $0.00"));
    }

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn test_to_json_failure_maps_to_report_error() {
        let err = to_json(&Unserializable, false).unwrap_err();
        assert!(matches!(err, report_core::ReportError::JsonParse(_)));
        assert_eq!(err.client_message(), "Failed to process the archive");
    }

    #[test]
    fn test_to_json_compact_and_pretty() {
        let payload = ErrorPayload {
            success: false,
            error: "Failed to read the archive".to_string(),
        };
        let compact = to_json(&payload, false).unwrap();
        assert_eq!(
            compact,
            r#"{"success":false,"error":"Failed to read the archive"}"#
        );
        assert!(to_json(&payload, true).unwrap().contains('\n'));
    }
}
