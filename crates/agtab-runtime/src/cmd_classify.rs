//! `agtab classify`: run the pane-text classifiers over captured text and
//! print what they see. Handy when tuning markers against a real capture.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use agtab_core::PaneReading;
use agtab_core::topic::classify_pane_topic;

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyReport {
    #[serde(flatten)]
    pub reading: PaneReading,
    pub topic: Option<String>,
}

pub(crate) fn classify_text(text: &str) -> ClassifyReport {
    ClassifyReport {
        reading: PaneReading::from_content(text),
        topic: classify_pane_topic(text),
    }
}

/// Entry point for `agtab classify [FILE]`.
pub fn cmd_classify(file: Option<&Path>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    println!("{}", serde_json::to_string_pretty(&classify_text(&text))?);
    Ok(())
}
