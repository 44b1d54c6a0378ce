use crate::report::Report;

const TITLE: &str = "=== MARKETPULSE REPORT ===\n";

/// Flatten a report into the plain-text document used for export.
///
/// Sections always appear in the same order; list sections are omitted
/// when empty. Lines are joined with `\n` without a trailing newline.
pub fn to_plain_text(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(TITLE.to_string());
    lines.push("EXECUTIVE SUMMARY".to_string());
    lines.push(report.executive_summary.clone());

    let sentiment = &report.overall_sentiment;
    lines.push("\nOVERALL SENTIMENT".to_string());
    lines.push(format!("Web Sentiment: {}", sentiment.web_sentiment));
    lines.push(format!("Developer Sentiment: {}", sentiment.developer_sentiment));
    lines.push(format!("Combined Rating: {}", sentiment.combined_rating));
    lines.push(sentiment.sentiment_summary.clone());

    let landscape = &report.market_landscape;
    lines.push("\nMARKET LANDSCAPE".to_string());
    lines.push(landscape.overview.clone());
    if !landscape.competitors.is_empty() {
        lines.push("\nKey Competitors:".to_string());
        for c in &landscape.competitors {
            lines.push(format!(
                "- {}: {} (Threat: {})",
                c.name, c.positioning, c.threat_level
            ));
        }
    }
    if !landscape.trends.is_empty() {
        lines.push("\nMarket Trends:".to_string());
        lines.extend(landscape.trends.iter().map(|t| format!("- {}", t)));
    }
    if !landscape.recent_news.is_empty() {
        lines.push("\nRecent News:".to_string());
        for n in &landscape.recent_news {
            lines.push(format!("- {} ({}) - {}", n.headline, n.source, n.relevance));
        }
    }

    let pulse = &report.developer_pulse;
    lines.push("\nDEVELOPER COMMUNITY PULSE".to_string());
    lines.push(pulse.sentiment_overview.clone());
    if !pulse.themes.is_empty() {
        lines.push("\nKey Themes:".to_string());
        lines.extend(pulse.themes.iter().map(|t| format!("- {}", t)));
    }
    if !pulse.opinions.is_empty() {
        lines.push("\nNotable Opinions:".to_string());
        for o in &pulse.opinions {
            lines.push(format!("- \"{}\" [{}]", o.opinion, o.sentiment));
        }
    }
    lines.push(format!("\nDiscussion Activity: {}", pulse.discussion_activity));

    if !report.risks.is_empty() {
        lines.push("\nRISKS & CONCERNS".to_string());
        for r in &report.risks {
            lines.push(format!("- [{}] {} (Source: {})", r.severity, r.concern, r.source));
        }
    }

    if !report.recommendations.is_empty() {
        lines.push("\nSTRATEGIC RECOMMENDATIONS".to_string());
        for r in &report.recommendations {
            lines.push(format!(
                "- [{}] {}\n  Rationale: {}",
                r.priority, r.recommendation, r.rationale
            ));
        }
    }

    lines.join("\n")
}
