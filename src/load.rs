//! Idempotent upsert of a cleaned dataset into the relational store.
//! The whole batch runs in one transaction: any failure rolls everything
//! back, so a partial load is never visible.

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use rusqlite::{params, Connection, Statement, Transaction};
use thiserror::Error;

use crate::model::{Difficulty, ProblemRecord};

static BRACKET_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").unwrap());

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("row {row}: missing problem id (title {title:?})")]
    MissingId { row: usize, title: String },
    #[error("row {row}: empty title for problem {id}")]
    EmptyTitle { row: usize, id: i64 },
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Apply every row to the store inside a single transaction and return the
/// number of problems upserted. Re-running with the same input converges:
/// scalar fields take the latest values, associations never duplicate.
pub fn load_dataset(
    conn: &mut Connection,
    rows: &[ProblemRecord],
    origin: &str,
) -> Result<usize, LoadError> {
    let tx = conn.transaction()?;
    let mut count = 0;
    {
        let mut stmts = LoadStatements::prepare(&tx)?;

        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
                .unwrap()
                .progress_chars("#>-"),
        );

        for (i, row) in rows.iter().enumerate() {
            stmts.apply(i + 1, row, origin)?;
            count += 1;
            pb.inc(1);
        }
        pb.finish_and_clear();
    }
    tx.commit()?;
    Ok(count)
}

/// Prepared statements for one load pass, reused across rows.
struct LoadStatements<'c> {
    problem: Statement<'c>,
    companies: NameTable<'c>,
    topics: NameTable<'c>,
    link_company: Statement<'c>,
    link_topic: Statement<'c>,
    similar: Statement<'c>,
}

impl<'c> LoadStatements<'c> {
    fn prepare(tx: &'c Transaction) -> rusqlite::Result<Self> {
        Ok(LoadStatements {
            problem: tx.prepare(
                "INSERT INTO problems
                 (id, title, difficulty, url, likes, question, examples, constraints, follow_up, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                     title = excluded.title,
                     difficulty = excluded.difficulty,
                     url = excluded.url,
                     likes = excluded.likes,
                     question = excluded.question,
                     examples = excluded.examples,
                     constraints = excluded.constraints,
                     follow_up = excluded.follow_up,
                     description = excluded.description",
            )?,
            companies: NameTable::prepare(tx, "companies")?,
            topics: NameTable::prepare(tx, "topics")?,
            link_company: tx.prepare(
                "INSERT OR IGNORE INTO problem_companies (problem_id, company_id) VALUES (?1, ?2)",
            )?,
            link_topic: tx.prepare(
                "INSERT OR IGNORE INTO problem_topics (problem_id, topic_id) VALUES (?1, ?2)",
            )?,
            similar: tx.prepare(
                "INSERT OR IGNORE INTO similar_questions (problem_id, sim_title, sim_url)
                 VALUES (?1, ?2, ?3)",
            )?,
        })
    }

    fn apply(&mut self, row_no: usize, row: &ProblemRecord, origin: &str) -> Result<(), LoadError> {
        let id = row.id.ok_or_else(|| LoadError::MissingId {
            row: row_no,
            title: row.title.clone(),
        })?;
        let title = row.title.trim();
        if title.is_empty() {
            return Err(LoadError::EmptyTitle { row: row_no, id });
        }

        self.problem.execute(params![
            id,
            title,
            Difficulty::parse(&row.difficulty).as_str(),
            row.url.trim(),
            parse_likes(&row.likes),
            row.question.trim(),
            row.examples.trim(),
            row.constraints.trim(),
            row.follow_up.trim(),
            row.description.trim(),
        ])?;

        for name in split_list(&row.companies) {
            if let Some(company_id) = self.companies.resolve(name)? {
                self.link_company.execute(params![id, company_id])?;
            }
        }

        for name in split_list(&row.related_topics) {
            if let Some(topic_id) = self.topics.resolve(name)? {
                self.link_topic.execute(params![id, topic_id])?;
            }
        }

        for (sim_title, sim_url) in parse_similar_questions(&row.similar_questions, origin) {
            self.similar.execute(params![id, sim_title, sim_url])?;
        }

        Ok(())
    }
}

/// Insert-then-lookup over a `(id, name UNIQUE)` table. The UNIQUE
/// constraint arbitrates concurrent first insertions of a name, so the
/// lookup always resolves a single id per name.
struct NameTable<'c> {
    insert: Statement<'c>,
    select: Statement<'c>,
}

impl<'c> NameTable<'c> {
    fn prepare(tx: &'c Transaction, table: &str) -> rusqlite::Result<Self> {
        Ok(NameTable {
            insert: tx.prepare(&format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", table))?,
            select: tx.prepare(&format!("SELECT id FROM {} WHERE name = ?1", table))?,
        })
    }

    /// Resolve a name to its row id, inserting it first if absent.
    /// Names that trim to empty are skipped entirely.
    fn resolve(&mut self, name: &str) -> rusqlite::Result<Option<i64>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.insert.execute([name])?;
        let id = self.select.query_row([name], |r| r.get(0))?;
        Ok(Some(id))
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// A strict non-negative integer literal parses; anything else counts as 0.
fn parse_likes(raw: &str) -> i64 {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Decode `[Title, URL]` bracket groups. A group needs at least two
/// comma-separated parts; the first two become title and URL. Root-relative
/// URLs are rewritten against `origin`.
fn parse_similar_questions(raw: &str, origin: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for cap in BRACKET_GROUP.captures_iter(raw) {
        let parts: Vec<&str> = cap[1].split(',').map(str::trim).collect();
        if parts.len() < 2 {
            continue;
        }
        let title = parts[0].to_string();
        let url = if parts[1].starts_with('/') {
            format!("{}{}", origin.trim_end_matches('/'), parts[1])
        } else {
            parts[1].to_string()
        };
        pairs.push((title, url));
    }
    pairs
}

// ── Tests ──
