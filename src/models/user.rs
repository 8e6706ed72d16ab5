use crate::utils::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 200;

/// Linha da tabela `users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Corpo de POST /users e PUT /users/{id} (substituição completa)
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone: i64,
}

impl UserPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(AppError::validation("name must not be empty"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }

        match self.email.split_once('@') {
            Some((local, domain)) if !local.trim().is_empty() && !domain.trim().is_empty() => {}
            _ => return Err(AppError::validation("email must look like local@domain")),
        }

        if self.phone < 0 {
            return Err(AppError::validation("phone must not be negative"));
        }

        Ok(())
    }
}

/// Campos expostos ao cliente. Qualquer campo novo em `User` fica de fora
/// até ser listado aqui.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: i64,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
        }
    }
}
