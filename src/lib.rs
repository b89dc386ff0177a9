//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 호출자(보고서 생성 등)도 같은 엔진을 쓰게 한다.

pub mod analysis;
pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod input;
pub mod quantity;
pub mod report;
pub mod solar;
pub mod ui_cli;
pub mod units;
