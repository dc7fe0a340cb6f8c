//! Non-interactive output: walk the pages and print each scan.

use std::io::Write;

use anyhow::{Context, Result, bail};
use scanhist_core::{
    EMPTY_DETAIL, EMPTY_TITLE, LogNotifier, PageSource, PagedListController, ScanRecord,
};
use tracing::info;

use crate::card::summary_line;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainOptions {
    /// Stop after this many pages. `None` follows `next` until exhausted.
    pub max_pages: Option<u64>,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainSummary {
    pub pages: u64,
    pub items: usize,
    /// More pages were available when output stopped.
    pub truncated: bool,
}

pub async fn run_plain<S, W>(source: &S, options: PlainOptions, out: &mut W) -> Result<PlainSummary>
where
    S: PageSource<Item = ScanRecord> + ?Sized,
    W: Write,
{
    let mut ctl = PagedListController::new(LogNotifier);
    let mut ticket = Some(ctl.mount());
    let mut pages = 0u64;
    let mut printed = 0usize;

    while let Some(t) = ticket.take() {
        let result = source.fetch_page(t.cursor()).await;
        ctl.complete(t, result);

        if let Some(message) = ctl.state().error() {
            bail!("Error: {message}");
        }
        pages += 1;

        for record in &ctl.state().items()[printed..] {
            if options.json {
                let line = serde_json::to_string(record).context("failed to encode scan")?;
                writeln!(out, "{line}")?;
            } else {
                writeln!(out, "{}", summary_line(record))?;
            }
        }
        printed = ctl.state().items().len();

        if options.max_pages.is_some_and(|max| pages >= max) {
            break;
        }
        ticket = ctl.load_more();
    }

    if printed == 0 && !options.json {
        writeln!(out, "{EMPTY_TITLE}")?;
        writeln!(out, "{EMPTY_DETAIL}")?;
    }

    let summary = PlainSummary {
        pages,
        items: printed,
        truncated: ctl.state().has_next_page(),
    };
    info!(pages, items = printed, truncated = summary.truncated, "listing finished");
    Ok(summary)
}
