mod bookkeeping;
pub mod combat;
mod income;
mod movement;
mod recruit;
mod vision;

pub use bookkeeping::BookkeepingSystem;
pub use income::IncomeSystem;
pub use movement::MovementSystem;
pub use recruit::RecruitSystem;
pub use vision::VisionSystem;
