//! Man-page search through `man -k`
//!
//! One apropos query per keyword. Every appearance of a page in a keyword's
//! output is worth 10 points; the page gains 50 for each keyword equal to
//! its name and 5 for each keyword found in its description.

use crate::core::error::ProviderError;
use crate::providers::{ManPageHit, ManPageProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const APPEARANCE_SCORE: u32 = 10;
const EXACT_NAME_SCORE: u32 = 50;
const DESCRIPTION_SCORE: u32 = 5;

/// Man sections searched: user commands and administration
const SECTIONS: &str = "1,8";

pub struct ManPageSearch {
    program: String,
    limit: usize,
}

impl ManPageSearch {
    pub fn new(limit: usize) -> Self {
        Self {
            program: "man".into(),
            limit,
        }
    }

    /// Use a different `man` executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Raw apropos output for one keyword
    async fn apropos(&self, keyword: &str) -> Result<String, ProviderError> {
        let output = Command::new(&self.program)
            .args(["-k", "-s", SECTIONS, keyword])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ProviderError::Unavailable(format!("{} not found", self.program))
                }
                _ => ProviderError::Query(e.to_string()),
            })?;

        // "nothing appropriate" exits non-zero; stdout is still authoritative
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ManPageProvider for ManPageSearch {
    async fn search_man_pages(&self, keywords: &[String]) -> Result<Vec<ManPageHit>, ProviderError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranking = ManPageRanking::default();
        for keyword in keywords {
            match self.apropos(keyword).await {
                Ok(output) => ranking.record_output(&output),
                Err(e @ ProviderError::Unavailable(_)) => return Err(e),
                Err(e) => tracing::debug!("apropos for '{}' failed: {}", keyword, e),
            }
        }

        Ok(ranking.finish(keywords, self.limit))
    }
}

/// Split an apropos line `name (section) - description` into its parts
///
/// Multi-name entries ("gzip, gunzip, zcat (1) - ...") keep the first name.
pub fn parse_apropos_line(line: &str) -> Option<(&str, &str)> {
    let (name_part, description) = line.split_once(" - ")?;
    let name_part = name_part.trim();
    let name = name_part
        .find(" (")
        .map_or(name_part, |idx| &name_part[..idx]);
    let name = name.split(',').next().unwrap_or(name).trim();
    if name.is_empty() {
        return None;
    }
    Some((name, description.trim()))
}

/// Accumulates apropos appearances in first-seen order
#[derive(Debug, Default)]
pub struct ManPageRanking {
    hits: Vec<ManPageHit>,
    index: HashMap<String, usize>,
}

impl ManPageRanking {
    pub fn record_output(&mut self, output: &str) {
        for (name, description) in output.lines().filter_map(parse_apropos_line) {
            self.record(name, description);
        }
    }

    pub fn record(&mut self, name: &str, description: &str) {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.hits.push(ManPageHit {
                    name: name.to_string(),
                    description: description.to_string(),
                    score: 0,
                });
                self.index.insert(name.to_string(), self.hits.len() - 1);
                self.hits.len() - 1
            }
        };
        self.hits[idx].score += APPEARANCE_SCORE;
    }

    /// Apply keyword boosts, order by descending score, keep the top `limit`
    ///
    /// Equal scores keep first-seen order.
    pub fn finish(mut self, keywords: &[String], limit: usize) -> Vec<ManPageHit> {
        for hit in &mut self.hits {
            let description = hit.description.to_lowercase();
            for keyword in keywords {
                if hit.name == *keyword {
                    hit.score += EXACT_NAME_SCORE;
                }
                if description.contains(keyword.as_str()) {
                    hit.score += DESCRIPTION_SCORE;
                }
            }
        }

        self.hits.sort_by(|a, b| b.score.cmp(&a.score));
        self.hits.truncate(limit);
        self.hits
    }
}

/// True when `name` resolves to an executable file on `PATH`
pub fn is_installed(name: &str) -> bool {
    if name.contains('/') {
        return is_executable(Path::new(name));
    }
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| {
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        is_executable(&dir.join(name))
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
