//! # 领域取值定义
//!
//! 错误日志的闭集字段（编程语言、错误分类、严重程度）以及
//! 列表查询的排序取值。所有闭集在服务层持久化之前完成校验，
//! 数据库中只会出现这里声明的规范字符串。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i32;
pub type ErrorLogId = i32;

/// 解析闭集取值失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 不支持取值 '{}'", self.field, self.value)
    }
}

impl std::error::Error for InvalidValue {}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// 全部合法取值
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// 规范字符串表示（与数据库存储一致）
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(InvalidValue {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set!(
    /// 编程语言闭集
    ProgrammingLanguage, "programmingLanguage", {
        JavaScript => "JavaScript",
        TypeScript => "TypeScript",
        Python => "Python",
        Java => "Java",
        Cpp => "C++",
        React => "React",
        NodeJs => "Node.js",
        Php => "PHP",
        Go => "Go",
        Rust => "Rust",
        CSharp => "C#",
        Swift => "Swift",
        Kotlin => "Kotlin",
        Ruby => "Ruby",
    }
);

closed_set!(
    /// 错误分类闭集
    ErrorCategory, "category", {
        SyntaxError => "Syntax Error",
        LogicError => "Logic Error",
        RuntimeError => "Runtime Error",
        TypeError => "Type Error",
        ApiError => "API Error",
        DatabaseError => "Database Error",
        PerformanceIssue => "Performance Issue",
        SecurityIssue => "Security Issue",
        BuildError => "Build Error",
        DeploymentError => "Deployment Error",
        ConfigurationError => "Configuration Error",
        NetworkError => "Network Error",
    }
);

closed_set!(
    /// 严重程度闭集
    Severity, "severity", {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
);

impl Default for Severity {
    fn default() -> Self {
        Self::Medium
    }
}

closed_set!(
    /// 列表查询允许的排序字段
    SortField, "sortBy", {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
        Severity => "severity",
        TimeToResolve => "timeToResolve",
    }
);

impl Default for SortField {
    fn default() -> Self {
        Self::CreatedAt
    }
}

closed_set!(
    /// 排序方向
    SortOrder, "sortOrder", {
        Asc => "asc",
        Desc => "desc",
    }
);

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("JavaScript", ProgrammingLanguage::JavaScript)]
    #[case("C++", ProgrammingLanguage::Cpp)]
    #[case("Node.js", ProgrammingLanguage::NodeJs)]
    #[case("C#", ProgrammingLanguage::CSharp)]
    fn programming_language_round_trips(
        #[case] text: &str,
        #[case] expected: ProgrammingLanguage,
    ) {
        let parsed: ProgrammingLanguage = text.parse().expect("应解析成功");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), text);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = "COBOL".parse::<ProgrammingLanguage>().unwrap_err();
        assert_eq!(err.field, "programmingLanguage");
        assert_eq!(err.value, "COBOL");
    }

    #[rstest]
    #[case("Syntax Error", ErrorCategory::SyntaxError)]
    #[case("API Error", ErrorCategory::ApiError)]
    #[case("Network Error", ErrorCategory::NetworkError)]
    fn category_round_trips(#[case] text: &str, #[case] expected: ErrorCategory) {
        let parsed: ErrorCategory = text.parse().expect("应解析成功");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), text);
    }

    #[test]
    fn severity_defaults_to_medium() {
        assert_eq!(Severity::default(), Severity::Medium);
        assert_eq!(Severity::ALL.len(), 4);
    }

    #[test]
    fn sort_defaults_match_list_contract() {
        // 列表默认按创建时间倒序
        assert_eq!(SortField::default(), SortField::CreatedAt);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert!("riskScore".parse::<SortField>().is_err());
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&ProgrammingLanguage::NodeJs).expect("序列化失败");
        assert_eq!(json, "\"Node.js\"");
        let back: ProgrammingLanguage = serde_json::from_str(&json).expect("反序列化失败");
        assert_eq!(back, ProgrammingLanguage::NodeJs);
    }
}
