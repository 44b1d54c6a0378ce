use crate::classify::{Axis, Bucket};
use crate::report::Report;

/// Render a report as a Markdown document
pub fn to_markdown(report: &Report) -> String {
    let mut content = String::new();

    content.push_str("# Market Research Report\n\n");

    content.push_str("## Executive Summary\n\n");
    push_paragraph(&mut content, &report.executive_summary);

    // Sentiment table
    let sentiment = &report.overall_sentiment;
    content.push_str("## Overall Sentiment\n\n");
    content.push_str("| Metric | Value |\n");
    content.push_str("|--------|-------|\n");
    content.push_str(&format!(
        "| Web Sentiment | {} |\n",
        badge(Axis::Sentiment, &sentiment.web_sentiment)
    ));
    content.push_str(&format!(
        "| Developer Sentiment | {} |\n",
        badge(Axis::Sentiment, &sentiment.developer_sentiment)
    ));
    content.push_str(&format!(
        "| Combined Rating | {} |\n\n",
        sentiment.combined_rating
    ));
    push_paragraph(&mut content, &sentiment.sentiment_summary);

    let landscape = &report.market_landscape;
    content.push_str("## Market Landscape\n\n");
    push_paragraph(&mut content, &landscape.overview);

    if !landscape.competitors.is_empty() {
        content.push_str("### Key Competitors\n\n");
        content.push_str("| Competitor | Positioning | Threat |\n");
        content.push_str("|------------|-------------|--------|\n");
        for c in &landscape.competitors {
            content.push_str(&format!(
                "| {} | {} | {} |\n",
                cell(&c.name),
                cell(&c.positioning),
                badge(Axis::Threat, &c.threat_level)
            ));
        }
        content.push('\n');
    }

    push_list(&mut content, "Market Trends", &landscape.trends);

    if !landscape.recent_news.is_empty() {
        content.push_str("### Recent News\n\n");
        for n in &landscape.recent_news {
            content.push_str(&format!(
                "- **{}** ({}) - {}\n",
                n.headline, n.source, n.relevance
            ));
        }
        content.push('\n');
    }

    let pulse = &report.developer_pulse;
    content.push_str("## Developer Community Pulse\n\n");
    push_paragraph(&mut content, &pulse.sentiment_overview);
    push_list(&mut content, "Key Themes", &pulse.themes);

    if !pulse.opinions.is_empty() {
        content.push_str("### Notable Opinions\n\n");
        for o in &pulse.opinions {
            content.push_str(&format!(
                "> {}\n>\n> {}\n\n",
                o.opinion,
                badge(Axis::Sentiment, &o.sentiment)
            ));
        }
    }

    content.push_str(&format!(
        "**Discussion Activity:** {}\n\n",
        if pulse.discussion_activity.is_empty() {
            "No data available"
        } else {
            pulse.discussion_activity.as_str()
        }
    ));

    if !report.risks.is_empty() {
        content.push_str("## Risks & Concerns\n\n");
        for r in &report.risks {
            content.push_str(&format!(
                "- {} {} (Source: {})\n",
                badge(Axis::Severity, &r.severity),
                r.concern,
                r.source
            ));
        }
        content.push('\n');
    }

    if !report.recommendations.is_empty() {
        content.push_str("## Strategic Recommendations\n\n");
        for (i, r) in report.recommendations.iter().enumerate() {
            content.push_str(&format!(
                "{}. {} {}\n   - **Rationale:** {}\n",
                i + 1,
                badge(Axis::Priority, &r.priority),
                r.recommendation,
                r.rationale
            ));
        }
        content.push('\n');
    }

    content.truncate(content.trim_end().len());
    content.push('\n');
    content
}

fn push_paragraph(content: &mut String, text: &str) {
    if !text.trim().is_empty() {
        content.push_str(text.trim_end());
        content.push_str("\n\n");
    }
}

fn push_list(content: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    content.push_str(&format!("### {}\n\n", heading));
    for item in items {
        content.push_str(&format!("- {}\n", item));
    }
    content.push('\n');
}

/// Label prefixed with a marker for its bucket, e.g. `[+] High`
fn badge(axis: Axis, label: &str) -> String {
    let marker = match axis.classify(label) {
        Bucket::Positive => "[+]",
        Bucket::Negative => "[-]",
        Bucket::Neutral => "[~]",
        Bucket::Unknown => "[?]",
    };
    format!("{} {}", marker, if label.is_empty() { "N/A" } else { label })
}

/// Escape pipes so free text cannot break a table row
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_markdown() {
        let md = to_markdown(&Report::default());
        assert!(md.starts_with("# Market Research Report\n\n## Executive Summary\n\n## Overall Sentiment"));
        assert!(md.contains("| Web Sentiment | [?] N/A |"));
        assert!(md.contains("**Discussion Activity:** No data available"));
        assert!(!md.contains("## Risks & Concerns"));
        assert!(md.ends_with("No data available\n"));
    }

    #[test]
    fn test_sample_markdown_badges() {
        let md = to_markdown(&Report::sample());
        assert!(md.contains("| Web Sentiment | [+] Positive |"));
        assert!(md.contains("| Developer Sentiment | [~] Cautiously Optimistic |"));
        assert!(md.contains("| GitHub Copilot | Market leader with deep VS Code integration | [-] High |"));
        assert!(md.contains("- [~] Over-reliance reducing fundamental coding skills"));
        assert!(md.contains("1. [-] High Invest in on-premise/local deployment options"));
        assert!(md.contains("### Key Themes\n\n- Code quality vs. speed tradeoffs\n"));
    }

    #[test]
    fn test_pipes_are_escaped_in_tables() {
        let mut report = Report::default();
        report.market_landscape.competitors.push(crate::report::Competitor {
            name: "A|B".to_string(),
            ..Default::default()
        });
        assert!(to_markdown(&report).contains("| A\\|B | N/A |"));
    }
}
