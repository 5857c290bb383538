use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }
    let conn =
        Connection::open(path).with_context(|| format!("Failed to open {}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS problems (
            id          INTEGER PRIMARY KEY,
            title       TEXT NOT NULL,
            difficulty  TEXT NOT NULL DEFAULT 'easy'
                        CHECK(difficulty IN ('easy','medium','hard')),
            url         TEXT,
            likes       INTEGER NOT NULL DEFAULT 0,
            question    TEXT,
            examples    TEXT,
            constraints TEXT,
            follow_up   TEXT,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS companies (
            id   INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS topics (
            id   INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS problem_companies (
            problem_id INTEGER NOT NULL REFERENCES problems(id),
            company_id INTEGER NOT NULL REFERENCES companies(id),
            UNIQUE(problem_id, company_id)
        );
        CREATE INDEX IF NOT EXISTS idx_pc_company ON problem_companies(company_id);

        CREATE TABLE IF NOT EXISTS problem_topics (
            problem_id INTEGER NOT NULL REFERENCES problems(id),
            topic_id   INTEGER NOT NULL REFERENCES topics(id),
            UNIQUE(problem_id, topic_id)
        );
        CREATE INDEX IF NOT EXISTS idx_pt_topic ON problem_topics(topic_id);

        CREATE TABLE IF NOT EXISTS similar_questions (
            problem_id INTEGER NOT NULL REFERENCES problems(id),
            sim_title  TEXT NOT NULL,
            sim_url    TEXT NOT NULL,
            UNIQUE(problem_id, sim_title, sim_url)
        );
        ",
    )?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub problems: usize,
    pub companies: usize,
    pub topics: usize,
    pub company_links: usize,
    pub topic_links: usize,
    pub similar: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |table: &str| -> Result<usize> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
        Ok(n)
    };
    Ok(Stats {
        problems: count("problems")?,
        companies: count("companies")?,
        topics: count("topics")?,
        company_links: count("problem_companies")?,
        topic_links: count("problem_topics")?,
        similar: count("similar_questions")?,
    })
}
