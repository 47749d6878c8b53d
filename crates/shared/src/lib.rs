//! # mailz 共有ユーティリティ
//!
//! ワークスペース全体で使用する共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は feature で必要なものだけに絞る

pub mod observability;
