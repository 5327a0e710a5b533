//! Conversions between the `shared` DTOs and domain types.

pub mod activity_mapper;
pub mod list_mapper;
pub mod member_mapper;
pub mod user_mapper;

pub use activity_mapper::ActivityMapper;
pub use list_mapper::ListMapper;
pub use member_mapper::MemberMapper;
pub use user_mapper::UserMapper;

use crate::domain::models::{Page, Paged};
use shared::{PageQuery, RowsResponse};

pub fn to_page(query: PageQuery) -> Page {
    Page::new(query.page, query.size)
}

pub fn to_rows_dto<T, D>(paged: Paged<T>, to_dto: impl Fn(T) -> D) -> RowsResponse<D> {
    RowsResponse {
        rows: paged.rows.into_iter().map(to_dto).collect(),
        count: paged.count,
    }
}
