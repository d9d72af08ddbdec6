// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Session command - interactive JSON-lines protocol over stdin/stdout
//!
//! Each input line is one request, answered by exactly one output line:
//!
//! ```text
//! {"recompute": {"selected_names": ["Ana"], "selected_types": ["Rede A"]}}
//! {"click": "p17"}
//! ```
//!
//! Requests are handled strictly in order, so a click always resolves
//! against the frame produced by the request before it.

use super::load_graph;
use crate::config::Config;
use crate::engine::{Frame, Session};
use crate::graph::SocialGraph;
use crate::types::FilterCriteria;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// One interaction from the front end
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// Recompute for new criteria
    Recompute(FilterCriteria),
    /// A click on a displayed node
    Click(String),
}

/// Answer to one request; always carries the frame on screen
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    /// False when the request was rejected
    pub ok: bool,
    /// Why the request was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Selection currently driving the frame
    pub selected_names: &'a [String],
    /// The frame on screen after handling the request
    pub frame: &'a Frame,
}

/// Run the session command on stdin/stdout
pub fn run(config: &Config) -> Result<()> {
    let graph = load_graph(config)?;
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let handled = serve(&graph, stdin, stdout)?;
    info!("Session ended after {} requests", handled);
    Ok(())
}

/// Serve requests until the input ends, returning how many were handled
pub fn serve<R: BufRead, W: Write>(
    graph: &SocialGraph,
    mut input: R,
    mut output: W,
) -> Result<usize> {
    let mut session = Session::new(graph);
    let mut handled = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input
            .read_until(b'\n', &mut buf)
            .context("Failed to read request")?
            == 0
        {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(err) => {
                debug!("Rejected request that is not UTF-8: {}", err);
                handled += 1;
                respond(&mut output, &session, Some(format!("invalid request: {err}")))?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let outcome = match serde_json::from_str::<Request>(line) {
            Ok(Request::Recompute(criteria)) => session.recompute(criteria).map(|_| ()),
            Ok(Request::Click(node_id)) => session.click(&node_id).map(|_| ()),
            Err(err) => {
                debug!("Rejected request {:?}: {}", line, err);
                handled += 1;
                respond(&mut output, &session, Some(format!("invalid request: {err}")))?;
                continue;
            }
        };

        handled += 1;
        respond(&mut output, &session, outcome.err().map(|e| e.to_string()))?;
    }

    Ok(handled)
}

fn respond<W: Write>(output: &mut W, session: &Session<'_>, notice: Option<String>) -> Result<()> {
    let response = Response {
        ok: notice.is_none(),
        notice,
        selected_names: &session.criteria().selected_names,
        frame: session.displayed(),
    };
    serde_json::to_writer(&mut *output, &response).context("Failed to write response")?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
