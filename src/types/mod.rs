//! # 领域类型模块

pub mod domain;

pub use domain::{
    ErrorCategory, ErrorLogId, ProgrammingLanguage, Severity, SortField, SortOrder, UserId,
};
