//! SQLite-backed award ledger.
//!
//! Holds the accounts, course catalog, completion facts, derived course
//! progress, and the append-only award log. Every XP grant runs as one
//! transaction: a unique-constrained insert into `completions` decides
//! whether the grant happens at all, and the XP increment is a single
//! `UPDATE ... RETURNING` so concurrent awards never lose an update.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::progression::{self, rank_for_level, Rank};
use crate::types::{
    Account, AccountProgress, ActivityEntry, AwardOutcome, CompletionResponse, CourseStatus,
    CourseSummary, Subject, SubjectKind,
};

/// Fixed XP for a first-time quiz completion.
pub const QUIZ_XP: u32 = 5;
/// Fixed XP for a first-time sandbox challenge completion.
pub const CHALLENGE_XP: u32 = 15;

/// A course to insert into the catalog if it is not there yet.
#[derive(Debug, Clone)]
pub struct CourseSeed {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub total_lessons: u32,
    pub xp_reward: u64,
    pub difficulty: &'static str,
    pub category: &'static str,
}

struct CourseRow {
    total_lessons: u32,
    xp_reward: u64,
}

/// Ledger store backed by SQLite.
#[derive(Clone)]
pub struct LedgerStore {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl LedgerStore {
    /// Open or create the ledger database at a specific path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL for concurrent readers, foreign keys for cascade deletes.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        };

        store.init_schema()?;
        info!("Ledger database ready at {}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                email TEXT PRIMARY KEY,
                display_name TEXT NOT NULL DEFAULT '',
                xp INTEGER NOT NULL DEFAULT 0,
                numeric_level INTEGER NOT NULL DEFAULT 1,
                rank TEXT NOT NULL DEFAULT 'Novice',
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                total_lessons INTEGER NOT NULL,
                xp_reward INTEGER NOT NULL,
                difficulty TEXT NOT NULL DEFAULT 'Beginner',
                category TEXT NOT NULL DEFAULT '',
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
            [],
        )?;

        // The idempotency boundary. Course-level subjects use lesson_number 0
        // because SQLite UNIQUE treats NULLs as distinct.
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS completions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_email TEXT NOT NULL REFERENCES accounts(email) ON DELETE CASCADE,
                subject_kind TEXT NOT NULL,
                course_id TEXT NOT NULL,
                lesson_number INTEGER NOT NULL,
                completed_at TEXT NOT NULL,
                UNIQUE(account_email, subject_kind, course_id, lesson_number)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS course_progress (
                account_email TEXT NOT NULL REFERENCES accounts(email) ON DELETE CASCADE,
                course_id TEXT NOT NULL,
                progress INTEGER NOT NULL DEFAULT 0,
                completed INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (account_email, course_id)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS award_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_email TEXT NOT NULL REFERENCES accounts(email) ON DELETE CASCADE,
                action TEXT NOT NULL,
                xp_awarded INTEGER NOT NULL,
                awarded_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_completions_account_course
             ON completions(account_email, course_id, subject_kind)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_award_log_account
             ON award_log(account_email, id)",
            [],
        )?;

        Ok(())
    }

    /// Insert catalog courses that are not present yet. Returns how many
    /// rows were added.
    pub fn seed_courses(&self, seeds: &[CourseSeed]) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut added = 0;
        for seed in seeds {
            added += conn.execute(
                r#"
                INSERT OR IGNORE INTO courses
                    (id, title, description, total_lessons, xp_reward, difficulty, category, is_active)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
                "#,
                params![
                    seed.id,
                    seed.title,
                    seed.description,
                    seed.total_lessons,
                    seed.xp_reward as i64,
                    seed.difficulty,
                    seed.category,
                ],
            )?;
        }
        if added > 0 {
            info!("Seeded {added} catalog courses");
        }
        Ok(added)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Create an account at level 1 with zero XP. The email is normalized
    /// (trimmed, lowercased) before it becomes the primary key.
    pub fn register_account(&self, email: &str, display_name: &str) -> Result<Account> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(LedgerError::InvalidEmail(email));
        }

        let created_at = Utc::now();
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO accounts (email, display_name, xp, numeric_level, rank, created_at)
            VALUES (?1, ?2, 0, 1, ?3, ?4)
            "#,
            params![email, display_name.trim(), Rank::Novice.as_str(), created_at],
        )?;
        if inserted == 0 {
            return Err(LedgerError::AccountExists(email));
        }

        debug!("Registered account {email}");
        Ok(Account {
            email,
            display_name: display_name.trim().to_string(),
            xp: 0,
            numeric_level: 1,
            rank: Rank::Novice,
            created_at,
        })
    }

    /// Stored XP plus the progress-bar fields derived from it.
    pub fn account_progress(&self, email: &str) -> Result<AccountProgress> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();

        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT display_name, xp FROM accounts WHERE email = ?1",
                params![email],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        let (display_name, xp) = row.ok_or_else(|| LedgerError::AccountNotFound(email.clone()))?;
        let p = progression::progress_signed(xp);

        Ok(AccountProgress {
            email,
            display_name,
            xp: xp.max(0) as u64,
            level: p.level,
            rank: rank_for_level(p.level),
            xp_into_level: p.xp_into_level,
            xp_to_next: p.xp_to_next,
        })
    }

    /// Delete an account. Completions, course progress, and log entries go
    /// with it via the foreign-key cascades.
    pub fn delete_account(&self, email: &str) -> Result<()> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM accounts WHERE email = ?1", params![email])?;
        if deleted == 0 {
            return Err(LedgerError::AccountNotFound(email));
        }
        info!("Deleted account {email}");
        Ok(())
    }

    // ========================================================================
    // Awards
    // ========================================================================

    /// Grant XP for a distinct completion event, exactly once.
    ///
    /// `xp_amount` is sanitized: negative values fall back to `default_xp`,
    /// and `cap` bounds the result when given. A repeat call for the same
    /// subject is a no-op that reports `already_completed`.
    pub fn award(
        &self,
        email: &str,
        subject: &Subject,
        xp_amount: i64,
        default_xp: u32,
        cap: Option<u32>,
        action: &str,
    ) -> Result<AwardOutcome> {
        let amount = sanitize_xp(xp_amount, default_xp, cap);
        let email = normalize_email(email);

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let outcome = award_in_tx(&tx, &email, subject, amount, action)?;
        tx.commit()?;
        Ok(outcome)
    }

    // ========================================================================
    // Completion operations
    // ========================================================================

    /// Complete one lesson. XP per lesson is the course reward divided
    /// equally across its lessons. Course progress is recomputed from the
    /// count of distinct completed lessons, and finishing the last one also
    /// records the course-level completion (no bonus XP) so a later
    /// instant-complete cannot double-grant.
    pub fn complete_lesson(
        &self,
        email: &str,
        course_id: &str,
        lesson_number: u32,
    ) -> Result<CompletionResponse> {
        if lesson_number == 0 {
            return Err(LedgerError::MissingField("lesson_number"));
        }
        let email = normalize_email(email);

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let course = course_in_tx(&tx, course_id)?;

        // Once the course-level record exists (instant complete or all
        // lessons done) further lesson awards resolve as duplicates.
        if course_completed_in_tx(&tx, &email, course_id)? {
            let level = account_level_in_tx(&tx, &email)?;
            let (pct, done) = progress_row_in_tx(&tx, &email, course_id)?;
            tx.commit()?;
            return Ok(CompletionResponse {
                xp_added: 0,
                new_level: level,
                already_completed: true,
                progress_pct: pct,
                completed: done,
            });
        }

        let per_lesson = course.xp_reward / course.total_lessons.max(1) as u64;
        let outcome = award_in_tx(
            &tx,
            &email,
            &Subject::lesson(course_id, lesson_number),
            per_lesson.min(u32::MAX as u64) as u32,
            "Lesson Completed",
        )?;

        let done_count = lesson_count_in_tx(&tx, &email, course_id)?;
        let pct = ((done_count * 100) / course.total_lessons.max(1) as u64).min(100) as u32;
        let completed = done_count >= course.total_lessons as u64;
        upsert_progress_in_tx(&tx, &email, course_id, pct, completed)?;

        if completed {
            // Marks the course done without the instant-complete bonus.
            insert_completion_in_tx(&tx, &email, &Subject::course(course_id))?;
        }

        tx.commit()?;
        Ok(CompletionResponse {
            xp_added: outcome.xp_added,
            new_level: outcome.new_level,
            already_completed: outcome.already_completed,
            progress_pct: pct,
            completed,
        })
    }

    /// Complete a quiz for one lesson. Fixed XP, once per
    /// (account, course, lesson).
    pub fn complete_quiz(
        &self,
        email: &str,
        course_id: &str,
        lesson_number: u32,
    ) -> Result<CompletionResponse> {
        self.complete_fixed(
            email,
            course_id,
            lesson_number,
            SubjectKind::Quiz,
            QUIZ_XP,
            "Quiz Completed",
        )
    }

    /// Complete a sandbox challenge for one lesson. Fixed XP, once per
    /// (account, course, lesson).
    pub fn complete_challenge(
        &self,
        email: &str,
        course_id: &str,
        lesson_number: u32,
    ) -> Result<CompletionResponse> {
        self.complete_fixed(
            email,
            course_id,
            lesson_number,
            SubjectKind::Challenge,
            CHALLENGE_XP,
            "Challenge Completed",
        )
    }

    fn complete_fixed(
        &self,
        email: &str,
        course_id: &str,
        lesson_number: u32,
        kind: SubjectKind,
        xp: u32,
        action: &str,
    ) -> Result<CompletionResponse> {
        if lesson_number == 0 {
            return Err(LedgerError::MissingField("lesson_number"));
        }
        let email = normalize_email(email);

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        course_in_tx(&tx, course_id)?;

        let subject = Subject {
            kind,
            course_id: course_id.to_string(),
            lesson_number,
        };
        let outcome = award_in_tx(&tx, &email, &subject, xp, action)?;
        let (pct, done) = progress_row_in_tx(&tx, &email, course_id)?;

        tx.commit()?;
        Ok(CompletionResponse {
            xp_added: outcome.xp_added,
            new_level: outcome.new_level,
            already_completed: outcome.already_completed,
            progress_pct: pct,
            completed: done,
        })
    }

    /// Instantly complete a whole course. Grants the course reward minus the
    /// shares already earned from individual lessons, keyed on the
    /// course-level subject, so any interleaving of lesson completions and
    /// instant completion sums to exactly the course reward.
    pub fn complete_course(&self, email: &str, course_id: &str) -> Result<CompletionResponse> {
        let email = normalize_email(email);

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let course = course_in_tx(&tx, course_id)?;

        let per_lesson = course.xp_reward / course.total_lessons.max(1) as u64;
        let lessons_done = lesson_count_in_tx(&tx, &email, course_id)?;
        let remaining = course.xp_reward.saturating_sub(per_lesson * lessons_done);

        let outcome = award_in_tx(
            &tx,
            &email,
            &Subject::course(course_id),
            remaining.min(u32::MAX as u64) as u32,
            "Course Completed",
        )?;

        if !outcome.already_completed {
            upsert_progress_in_tx(&tx, &email, course_id, 100, true)?;
        }
        let (pct, done) = progress_row_in_tx(&tx, &email, course_id)?;

        tx.commit()?;
        Ok(CompletionResponse {
            xp_added: outcome.xp_added,
            new_level: outcome.new_level,
            already_completed: outcome.already_completed,
            progress_pct: pct,
            completed: done,
        })
    }

    /// Ensure a progress row exists so the course shows up as started.
    /// Idempotent; never moves progress backwards.
    pub fn start_course(&self, email: &str, course_id: &str) -> Result<()> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();

        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM accounts WHERE email = ?1",
                params![email],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(LedgerError::AccountNotFound(email));
        }

        conn.execute(
            r#"
            INSERT INTO course_progress (account_email, course_id, progress, completed, updated_at)
            VALUES (?1, ?2, 0, 0, ?3)
            ON CONFLICT(account_email, course_id) DO NOTHING
            "#,
            params![email, course_id, Utc::now()],
        )?;
        Ok(())
    }

    // ========================================================================
    // Read views
    // ========================================================================

    /// Active catalog courses joined with one account's progress.
    pub fn list_courses(&self, email: &str) -> Result<Vec<CourseSummary>> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, c.title, c.description, c.total_lessons, c.xp_reward,
                   c.difficulty, c.category,
                   COALESCE(p.progress, 0), COALESCE(p.completed, 0)
            FROM courses c
            LEFT JOIN course_progress p
                ON p.course_id = c.id AND p.account_email = ?1
            WHERE c.is_active = 1
            ORDER BY c.id
            "#,
        )?;

        let rows = stmt.query_map(params![email], |r| {
            Ok(CourseSummary {
                id: r.get(0)?,
                title: r.get(1)?,
                description: r.get(2)?,
                total_lessons: r.get(3)?,
                xp_reward: r.get::<_, i64>(4)?.max(0) as u64,
                difficulty: r.get(5)?,
                category: r.get(6)?,
                progress_pct: r.get(7)?,
                completed: r.get::<_, i64>(8)? != 0,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Completed lesson/quiz/challenge numbers for badge display.
    pub fn course_status(&self, email: &str, course_id: &str) -> Result<CourseStatus> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();

        let fetch = |kind: SubjectKind| -> Result<Vec<u32>> {
            let mut stmt = conn.prepare(
                r#"
                SELECT lesson_number FROM completions
                WHERE account_email = ?1 AND course_id = ?2 AND subject_kind = ?3
                      AND lesson_number > 0
                ORDER BY lesson_number
                "#,
            )?;
            let rows = stmt.query_map(params![email, course_id, kind.as_str()], |r| r.get(0))?;
            Ok(rows.collect::<std::result::Result<Vec<u32>, _>>()?)
        };

        let lessons = fetch(SubjectKind::Lesson)?;
        let quizzes = fetch(SubjectKind::Quiz)?;
        let challenges = fetch(SubjectKind::Challenge)?;

        let row: Option<(u32, i64)> = conn
            .query_row(
                "SELECT progress, completed FROM course_progress
                 WHERE account_email = ?1 AND course_id = ?2",
                params![email, course_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        let (progress_pct, completed) = row.map(|(p, c)| (p, c != 0)).unwrap_or((0, false));

        Ok(CourseStatus {
            course_id: course_id.to_string(),
            lessons,
            quizzes,
            challenges,
            progress_pct,
            completed,
        })
    }

    /// Newest award-log entries, newest first.
    pub fn recent_activity(&self, email: &str, limit: u32) -> Result<Vec<ActivityEntry>> {
        let email = normalize_email(email);
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT action, xp_awarded, awarded_at FROM award_log
            WHERE account_email = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![email, limit], |r| {
            Ok(ActivityEntry {
                action: r.get(0)?,
                xp_awarded: r.get::<_, i64>(1)?.max(0) as u64,
                awarded_at: r.get(2)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// Lowercase and trim; the stored primary key form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shape check only: one '@', non-empty local part, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Negative or missing amounts fall back to the caller's default; `cap`
/// bounds the result when present.
fn sanitize_xp(amount: i64, default_xp: u32, cap: Option<u32>) -> u32 {
    let value = if amount < 0 {
        default_xp
    } else {
        amount.min(u32::MAX as i64) as u32
    };
    match cap {
        Some(max) => value.min(max),
        None => value,
    }
}

// ============================================================================
// Transaction helpers. Every mutation of the award path goes through these
// inside one transaction so a failure partway leaves nothing behind.
// ============================================================================

fn award_in_tx(
    tx: &Transaction<'_>,
    email: &str,
    subject: &Subject,
    amount: u32,
    action: &str,
) -> Result<AwardOutcome> {
    let current_level = account_level_in_tx(tx, email)?;

    if !insert_completion_in_tx(tx, email, subject)? {
        return Ok(AwardOutcome {
            xp_added: 0,
            new_level: current_level,
            already_completed: true,
        });
    }

    // Atomic increment-and-return; no read-modify-write in app code.
    let new_xp: i64 = tx.query_row(
        "UPDATE accounts SET xp = xp + ?1 WHERE email = ?2 RETURNING xp",
        params![amount as i64, email],
        |r| r.get(0),
    )?;

    let p = progression::progress_signed(new_xp);
    let rank = rank_for_level(p.level);
    tx.execute(
        "UPDATE accounts SET numeric_level = ?1, rank = ?2 WHERE email = ?3",
        params![p.level, rank.as_str(), email],
    )?;

    tx.execute(
        "INSERT INTO award_log (account_email, action, xp_awarded, awarded_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![email, action, amount as i64, Utc::now()],
    )?;

    debug!("Awarded {amount} XP to {email} for {action:?} (level {})", p.level);
    Ok(AwardOutcome {
        xp_added: amount as u64,
        new_level: p.level,
        already_completed: false,
    })
}

/// Insert the completion fact; false means it was already there.
fn insert_completion_in_tx(tx: &Transaction<'_>, email: &str, subject: &Subject) -> Result<bool> {
    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO completions
            (account_email, subject_kind, course_id, lesson_number, completed_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            email,
            subject.kind.as_str(),
            subject.course_id,
            subject.lesson_number,
            Utc::now(),
        ],
    )?;
    Ok(inserted == 1)
}

fn account_level_in_tx(tx: &Transaction<'_>, email: &str) -> Result<u32> {
    let level: Option<u32> = tx
        .query_row(
            "SELECT numeric_level FROM accounts WHERE email = ?1",
            params![email],
            |r| r.get(0),
        )
        .optional()?;
    level.ok_or_else(|| LedgerError::AccountNotFound(email.to_string()))
}

fn course_in_tx(tx: &Transaction<'_>, course_id: &str) -> Result<CourseRow> {
    let row: Option<(u32, i64)> = tx
        .query_row(
            "SELECT total_lessons, xp_reward FROM courses WHERE id = ?1 AND is_active = 1",
            params![course_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let (total_lessons, xp_reward) =
        row.ok_or_else(|| LedgerError::CourseNotFound(course_id.to_string()))?;
    Ok(CourseRow {
        total_lessons,
        xp_reward: xp_reward.max(0) as u64,
    })
}

fn course_completed_in_tx(tx: &Transaction<'_>, email: &str, course_id: &str) -> Result<bool> {
    let found: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM completions
             WHERE account_email = ?1 AND subject_kind = 'course' AND course_id = ?2",
            params![email, course_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn lesson_count_in_tx(tx: &Transaction<'_>, email: &str, course_id: &str) -> Result<u64> {
    let count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM completions
         WHERE account_email = ?1 AND subject_kind = 'lesson' AND course_id = ?2",
        params![email, course_id],
        |r| r.get(0),
    )?;
    Ok(count.max(0) as u64)
}

fn progress_row_in_tx(tx: &Transaction<'_>, email: &str, course_id: &str) -> Result<(u32, bool)> {
    let row: Option<(u32, i64)> = tx
        .query_row(
            "SELECT progress, completed FROM course_progress
             WHERE account_email = ?1 AND course_id = ?2",
            params![email, course_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    Ok(row.map(|(p, c)| (p, c != 0)).unwrap_or((0, false)))
}

fn upsert_progress_in_tx(
    tx: &Transaction<'_>,
    email: &str,
    course_id: &str,
    pct: u32,
    completed: bool,
) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO course_progress (account_email, course_id, progress, completed, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(account_email, course_id)
        DO UPDATE SET progress = ?3, completed = ?4, updated_at = ?5
        "#,
        params![email, course_id, pct, completed as i64, Utc::now()],
    )?;
    Ok(())
}
