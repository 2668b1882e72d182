use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::provider::Candidate;

const LIST_HEADER: [&str; 7] = [
    "Name",
    "InstanceID",
    "PrivateIP",
    "Role",
    "Type",
    "State",
    "Uptime",
];

/// The list view never errors on a missing address; this marker stands in so
/// the row still lines up. It is reserved for the address column only.
const MISSING_ADDRESS: &str = "N/A";

/// The tabular candidate list plus the parallel address sequence. Row `i` of
/// `rows()` corresponds to `addresses[i]`, so a picked row index maps
/// directly to a connection target.
pub struct CandidateSet {
    pub addresses: Vec<Option<String>>,
    pub lines: Vec<String>,
}

impl CandidateSet {
    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    pub fn rows(&self) -> &[String] {
        &self.lines[1..]
    }
}

pub fn render_candidate_set(candidates: &[Candidate]) -> CandidateSet {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(candidates.len() + 1);
    cells.push(LIST_HEADER.iter().map(|h| h.to_string()).collect());

    let mut addresses = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        cells.push(vec![
            candidate.name.clone(),
            candidate.instance_id.clone(),
            candidate
                .private_ip
                .clone()
                .unwrap_or_else(|| MISSING_ADDRESS.to_string()),
            candidate.role_profile(),
            candidate.instance_type.clone(),
            candidate.state.clone(),
            uptime(candidate),
        ]);
        addresses.push(candidate.private_ip.clone());
    }

    CandidateSet {
        addresses,
        lines: align_columns(&cells),
    }
}

/// Vertical key:value block for a single candidate. Unlike the list view, a
/// missing private IP is an error here: the caller is about to connect to it.
pub fn render_candidate_detail(candidate: &Candidate) -> Result<String> {
    let private_ip = candidate
        .private_ip
        .as_deref()
        .ok_or_else(|| Error::AddressUnavailable(candidate.instance_id.clone()))?;

    let cells = vec![
        vec!["Name:".to_string(), candidate.name.clone()],
        vec!["Instance ID:".to_string(), candidate.instance_id.clone()],
        vec!["Private IP:".to_string(), private_ip.to_string()],
        vec!["Environment:".to_string(), candidate.environment.clone()],
        vec!["Role:".to_string(), candidate.role.clone()],
        vec!["Profile:".to_string(), candidate.profile.clone()],
        vec!["Type:".to_string(), candidate.instance_type.clone()],
        vec!["State:".to_string(), candidate.state.clone()],
        vec!["Uptime:".to_string(), uptime(candidate)],
    ];

    let mut block = align_columns(&cells).join("\n");
    block.push('\n');
    Ok(block)
}

fn uptime(candidate: &Candidate) -> String {
    match candidate.launch_time {
        Some(launched) => humanize_time(launched, Utc::now()),
        None => String::new(),
    }
}

/// Human-relative rendering of a past timestamp, e.g. "3 days ago".
pub fn humanize_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);

    let (value, unit) = if secs < 60 {
        (secs, "second")
    } else if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3600, "hour")
    } else if secs < 30 * 86_400 {
        (secs / 86_400, "day")
    } else if secs < 365 * 86_400 {
        (secs / (30 * 86_400), "month")
    } else {
        (secs / (365 * 86_400), "year")
    };

    if secs < 2 {
        return "now".to_string();
    }
    if value == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{value} {unit}s ago")
    }
}

/// Left-aligns each column to its widest cell plus a one-space gap, in the
/// manner of a minwidth-0, padding-1 tabwriter. The last cell of each row is
/// emitted unpadded.
fn align_columns(cells: &[Vec<String>]) -> Vec<String> {
    let columns = cells.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in cells {
        for (i, cell) in row.iter().enumerate() {
            if i + 1 < row.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    cells
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i + 1 < row.len() {
                    line.push_str(&format!("{:<width$} ", cell, width = widths[i]));
                } else {
                    line.push_str(cell);
                }
            }
            line
        })
        .collect()
}
