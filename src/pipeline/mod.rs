pub mod stage1_score;
pub mod stage2_diff;
pub mod stage3_report;
