//! # TechSupport Analyze Command
//!
//! File: cli/src/commands/analyze.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `techsupport analyze`, a debugging aid that shows how a message is
//! understood: the normalized tokens, the classified intent and the four entity
//! fields. No conversation state is created or changed.
//!
//! ## Examples
//!
//! ```bash
//! techsupport analyze "My order 123456 hasn't shipped yet"
//! ```
//!
//! ```text
//! Tokens:       order, 123456, hasnt, shipped, yet
//! Intent:       order
//! product:      -
//! issue_type:   -
//! order_number: 123456
//! date:         -
//! ```
//!
use super::GlobalOptions;
use clap::Parser;
use techsupport::core::error::Result;
use techsupport::dialogue::entities::EntityField;
use techsupport::dialogue::session::Analysis;

/// # Analyze Arguments (`AnalyzeArgs`)
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// The message to analyze. Multiple words are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,
}

pub async fn handle_analyze(args: AnalyzeArgs, global: &GlobalOptions) -> Result<()> {
    let (_, bot) = global.start_session()?;
    let analysis = bot.analyze(&args.text.join(" "));
    print!("{}", format_analysis(&analysis));
    Ok(())
}

fn format_analysis(analysis: &Analysis) -> String {
    let mut out = format!(
        "{:<14}{}\n{:<14}{}\n",
        "Tokens:",
        analysis.tokens.join(", "),
        "Intent:",
        analysis.intent
    );
    for field in EntityField::ALL {
        let label = format!("{}:", field);
        out.push_str(&format!(
            "{:<14}{}\n",
            label,
            analysis.entities.get(field).unwrap_or("-")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use techsupport::dialogue::entities::EntityBundle;
    use techsupport::dialogue::intent::Intent;

    #[test]
    fn formats_all_fields() {
        let analysis = Analysis {
            tokens: vec!["order".into(), "123456".into()],
            intent: Intent::Order,
            entities: EntityBundle {
                order_number: Some("123456".into()),
                ..Default::default()
            },
        };
        assert_eq!(
            format_analysis(&analysis),
            "Tokens:       order, 123456\n\
             Intent:       order\n\
             product:      -\n\
             issue_type:   -\n\
             order_number: 123456\n\
             date:         -\n"
        );
    }
}
