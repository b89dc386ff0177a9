//! 태양광 발전 설비 용량 산정과 경제성(회수기간) 계산 모듈 모음.
//! 두 엔진 모두 입력 구조체를 받아 결과 구조체를 새로 만들어 돌려주는 순수 함수로 구성한다.

pub mod energy_balance;
pub mod payback;
pub mod projection;
pub mod sizing;

pub use energy_balance::*;
pub use payback::*;
pub use projection::*;
pub use sizing::*;

/// 1년의 개월 수. 월별 시퀀스는 항상 이 길이를 가진다.
pub const MONTHS_PER_YEAR: usize = 12;

/// 월 이름 약어 (index 0 = 1월).
pub const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
