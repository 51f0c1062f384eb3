//! 숯 → 바이오가스 전환 절감량 계산 모듈 모음.

pub mod calculator;
pub mod report;

pub use calculator::*;
pub use report::SavingsReport;
