//! Database schema and connection management

use crate::error::{Result, ScoreError};
use dirs::data_dir;
use rusqlite::{Connection, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection manager for teams, players, matches and the ball log
pub struct ScoreDatabase {
    pub(crate) conn: Connection,
}

impl ScoreDatabase {
    /// Open the database at `path`, creating the file and tables if needed
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests and dry runs
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Default location of the database file
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = data_dir().ok_or_else(|| ScoreError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("cricket-score").join("scores.db"))
    }

    /// Borrow the underlying connection, e.g. to use it as a repository
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside one write transaction.
    ///
    /// The write lock is taken up front, so concurrent writers queue on the
    /// busy timeout instead of failing mid-way. Any error rolls back every
    /// write made through the connection handed to `f`.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                short_name TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                team_id INTEGER NOT NULL,
                role TEXT,
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        // Innings and result are embedded: a match owns them outright
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                match_id INTEGER PRIMARY KEY AUTOINCREMENT,
                home_team_id INTEGER NOT NULL,
                away_team_id INTEGER NOT NULL,
                venue TEXT,
                overs INTEGER NOT NULL,
                innings_per_side INTEGER NOT NULL DEFAULT 1,
                end_on_target INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                current_innings INTEGER NOT NULL DEFAULT 0,
                innings_json TEXT NOT NULL DEFAULT '[]',
                result_json TEXT,
                version INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (home_team_id) REFERENCES teams(team_id),
                FOREIGN KEY (away_team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS balls (
                ball_id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER NOT NULL,
                innings INTEGER NOT NULL,
                over_number INTEGER NOT NULL,
                ball_number INTEGER NOT NULL,
                bowler_id INTEGER NOT NULL,
                batsman_id INTEGER NOT NULL,
                non_striker_id INTEGER,
                fielder_id INTEGER,
                runs INTEGER NOT NULL CHECK (runs BETWEEN 0 AND 6),
                is_wide INTEGER NOT NULL DEFAULT 0,
                is_no_ball INTEGER NOT NULL DEFAULT 0,
                is_bye INTEGER NOT NULL DEFAULT 0,
                is_leg_bye INTEGER NOT NULL DEFAULT 0,
                is_wicket INTEGER NOT NULL DEFAULT 0,
                wicket_type TEXT,
                commentary TEXT,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (match_id) REFERENCES matches(match_id),
                FOREIGN KEY (bowler_id) REFERENCES players(player_id),
                FOREIGN KEY (batsman_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        // Create indexes for log-order reads and per-player stats
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_balls_match_order
             ON balls(match_id, innings, over_number, ball_number, ball_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id)",
            [],
        )?;

        Ok(())
    }
}
