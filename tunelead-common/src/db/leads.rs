//! Lead store operations
//!
//! Leads are never deleted; status moves forward by explicit admin action.
//! `update_status` deliberately accepts any of the three statuses without
//! transition checks, matching the admin panel's permissive behavior.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{Lead, LeadStatus, NewLead};
use crate::{Error, Result};

/// Upper bound on a single listing, regardless of the caller's `limit`.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Validate and persist a new lead. Status starts at `new`, the notified
/// flag false; id and created_at are assigned here.
pub async fn create(pool: &SqlitePool, new: NewLead) -> Result<Lead> {
    validate(&new)?;

    let source = new
        .source
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "landing".to_string());
    let text_description = if new.has_text {
        new.text_description
    } else {
        None
    };
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO leads (name, email, phone, style, has_text, text_description,
                           message, source, status, created_at, notified)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'new', ?9, 0)
        "#,
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.style)
    .bind(new.has_text)
    .bind(&text_description)
    .bind(&new.message)
    .bind(&source)
    .bind(created_at)
    .execute(pool)
    .await?;

    get(pool, result.last_insert_rowid()).await
}

/// List leads ordered by creation time, newest first. `limit` bounds the
/// result count (zero yields an empty page), clamped to [`MAX_LIST_LIMIT`].
pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Lead>> {
    let limit = limit.clamp(0, MAX_LIST_LIMIT);
    let skip = skip.max(0);

    let leads = sqlx::query_as::<_, Lead>(
        "SELECT * FROM leads ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await?;

    Ok(leads)
}

/// Fetch a single lead by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Lead> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Lead {} not found", id)))
}

/// Update a lead's status.
pub async fn update_status(pool: &SqlitePool, id: i64, status: LeadStatus) -> Result<()> {
    let result = sqlx::query("UPDATE leads SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Lead {} not found", id)));
    }
    Ok(())
}

/// Record that the operator notification attempt was made.
pub async fn mark_notified(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE leads SET notified = 1 WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn count_total(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_with_status(pool: &SqlitePool, status: LeadStatus) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE status = ?1")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count leads created at or after the given instant.
pub async fn count_created_since(pool: &SqlitePool, since: DateTime<Utc>) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE created_at >= ?1")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn validate(new: &NewLead) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput("Name must not be empty".to_string()));
    }
    if !is_valid_email(&new.email) {
        return Err(Error::InvalidInput(format!(
            "Malformed email address: {}",
            new.email
        )));
    }
    if new.phone.trim().is_empty() {
        return Err(Error::InvalidInput("Phone must not be empty".to_string()));
    }
    if new.style.trim().is_empty() {
        return Err(Error::InvalidInput("Style must not be empty".to_string()));
    }
    Ok(())
}

/// Minimal well-formedness check: one '@', non-empty local part, and a
/// dotted domain with no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|seg| !seg.is_empty())
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana@nodot"));
        assert!(!is_valid_email("ana@ex ample.com"));
        assert!(!is_valid_email("ana@example..com"));
        assert!(!is_valid_email("a@b@example.com"));
    }
}
