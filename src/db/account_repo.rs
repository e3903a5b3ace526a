// src/db/account_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        account::{Account, NewAccount, ProfileUpdatePayload},
        auth::Role,
    },
};

// As tabelas `clients`, `owners` e `admins` têm o mesmo formato, por isso o
// repositório recebe o papel e escolhe a tabela. O nome vem sempre de `Role::table`,
// nunca de entrada do utilizador.
fn columns(role: Role) -> &'static str {
    match role {
        Role::Owner => "id, email, nom, prenom, num_tele, nom_complexe, password_hash, created_at",
        _ => "id, email, nom, prenom, num_tele, password_hash, created_at",
    }
}

#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE lower(email) = lower($1)",
            columns(role),
            role.table()
        );
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, role: Role, id: i64) -> Result<Option<Account>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", columns(role), role.table());
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn exists(&self, role: Role, id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", role.table());
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn list(&self, role: Role) -> Result<Vec<Account>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", columns(role), role.table());
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }

    // Recebe um executor para poder correr dentro da transação de criação de proprietário
    pub async fn create<'e, E>(
        &self,
        executor: E,
        role: Role,
        new: &NewAccount<'_>,
    ) -> Result<Account, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = match role {
            Role::Owner => format!(
                "INSERT INTO owners (email, nom, prenom, num_tele, nom_complexe, password_hash)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {}",
                columns(role)
            ),
            _ => format!(
                "INSERT INTO {} (email, nom, prenom, num_tele, password_hash)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {}",
                role.table(),
                columns(role)
            ),
        };

        let mut query = sqlx::query_as::<_, Account>(&sql)
            .bind(new.email)
            .bind(new.nom)
            .bind(new.prenom)
            .bind(new.num_tele);
        if role == Role::Owner {
            query = query.bind(new.nom_complexe);
        }

        query
            .bind(new.password_hash)
            .fetch_one(executor)
            .await
            .map_err(AppError::from_unique_violation)
    }

    // Só altera os campos presentes
    pub async fn update_profile(
        &self,
        role: Role,
        id: i64,
        changes: &ProfileUpdatePayload,
    ) -> Result<Account, AppError> {
        let sql = format!(
            "UPDATE {} SET
                nom = COALESCE($2, nom),
                prenom = COALESCE($3, prenom),
                num_tele = COALESCE($4, num_tele),
                email = COALESCE($5, email)
             WHERE id = $1
             RETURNING {}",
            role.table(),
            columns(role)
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(changes.nom.as_deref())
            .bind(changes.prenom.as_deref())
            .bind(changes.num_tele.as_deref())
            .bind(changes.email.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_unique_violation)?
            .ok_or_else(|| AppError::ResourceNotFound("Compte introuvable".to_string()))
    }

    pub async fn update_password(&self, role: Role, id: i64, password_hash: &str) -> Result<(), AppError> {
        let sql = format!("UPDATE {} SET password_hash = $2 WHERE id = $1", role.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Compte introuvable".to_string()));
        }
        Ok(())
    }

    pub async fn count(&self, role: Role) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", role.table());
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
