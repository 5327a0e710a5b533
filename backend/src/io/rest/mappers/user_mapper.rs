use crate::domain::commands::users::{LoginCommand, RegisterUserCommand, UpdateUserCommand};
use crate::domain::models::{AuthToken, User as DomainUser};
use shared::{LoginRequest, RegisterUserRequest, TokenResponse, UpdateUserRequest, User as SharedUser};

pub struct UserMapper;

impl UserMapper {
    /// The password hash is dropped here.
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            email: domain.email,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_token_dto(token: AuthToken) -> TokenResponse {
        TokenResponse {
            token: token.token,
            expires_at: token.expires_at.to_rfc3339(),
        }
    }

    pub fn to_register_command(dto: RegisterUserRequest) -> RegisterUserCommand {
        RegisterUserCommand {
            email: dto.email,
            password: dto.password,
        }
    }

    pub fn to_update_command(user_id: String, dto: UpdateUserRequest) -> UpdateUserCommand {
        UpdateUserCommand {
            user_id,
            email: dto.email,
            password: dto.password,
        }
    }

    pub fn to_login_command(dto: LoginRequest) -> LoginCommand {
        LoginCommand {
            email: dto.email,
            password: dto.password,
        }
    }
}
