use chrono::{DateTime, Local};

use quorum::conf::QuorumConf;
use quorum::proto::control::StatusResponse;

use crate::CtlError;

pub const HEADER: [&str; 6] = ["NAME", "INCREMENT", "PROMISED", "ID", "HOLDER", "LAST SEEN"];

/// Report is the latest status poll of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub name: String,
    /// None if the last poll failed, or there was none yet.
    pub status: Option<StatusResponse>,
    pub seen: Option<DateTime<Local>>,
}

/// Board keeps one report per instance, in quorum file order, and renders them as a table.
#[derive(Debug, Clone)]
pub struct Board {
    reports: Vec<Report>,
}

impl Board {
    pub fn new(conf: &QuorumConf) -> Board {
        let reports = conf
            .instances
            .iter()
            .map(|m| Report {
                name: m.name.clone(),
                status: None,
                seen: None,
            })
            .collect();

        Board { reports }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// update replaces the report of instance `name`. A failed poll clears it.
    pub fn update(
        &mut self,
        name: &str,
        rst: Result<StatusResponse, CtlError>,
        now: DateTime<Local>,
    ) {
        let r = match self.reports.iter_mut().find(|r| r.name == name) {
            Some(r) => r,
            None => return,
        };

        match rst {
            Ok(status) => {
                r.status = Some(status);
                r.seen = Some(now);
            }
            Err(_) => {
                r.status = None;
                r.seen = None;
            }
        }
    }

    pub fn rows(&self, now: DateTime<Local>) -> Vec<Vec<String>> {
        let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>()];

        for r in self.reports.iter() {
            let row = match (&r.status, r.seen) {
                (Some(st), Some(seen)) => vec![
                    r.name.clone(),
                    st.increment.to_string(),
                    st.promised.to_string(),
                    st.id.to_string(),
                    st.holder.clone(),
                    ago(now - seen),
                ],
                _ => vec![
                    r.name.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    "connection error".to_string(),
                ],
            };
            rows.push(row);
        }
        rows
    }

    /// render lays the rows out in left aligned columns, 3 spaces apart.
    pub fn render(&self, now: DateTime<Local>) -> String {
        let rows = self.rows(now);

        let mut widths = vec![0; HEADER.len()];
        for row in rows.iter() {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in rows.iter() {
            let last = row.len() - 1;
            for (i, cell) in row.iter().enumerate() {
                if i == last {
                    out.push_str(cell);
                } else {
                    out.push_str(&format!("{:<w$}", cell, w = widths[i] + 3));
                }
            }
            out.push('\n');
        }
        out
    }
}

/// ago describes how long ago something happened, e.g. `now` or `3 seconds ago`.
pub fn ago(d: chrono::Duration) -> String {
    let secs = d.num_seconds();

    let (n, unit) = if secs < 1 {
        return "now".to_string();
    } else if secs < 60 {
        (secs, "second")
    } else if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86400 {
        (secs / 3600, "hour")
    } else {
        (secs / 86400, "day")
    };

    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
