// ==========================================
// 经销商/商城 ETL - 关系生成错误类型
// ==========================================
// 红线: 候选集合不足时必须快速失败，不得进入无限重抽
// ==========================================

use thiserror::Error;

/// 关系生成器错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("候选集合为空: 需要至少 1 个 {candidate} 才能为 {count} 条 {target} 生成关联")]
    EmptyCandidatePool {
        candidate: &'static str,
        target: &'static str,
        count: usize,
    },

    #[error("分类数量不足: 每个商品需要 {required} 个不同分类，当前仅有 {available} 个")]
    InsufficientCategories { required: usize, available: usize },

    #[error("用户数量不足: 买家必须不同于卖家，至少需要 2 个不同用户，当前仅有 {available} 个")]
    InsufficientUsers { available: usize },
}

/// Result 类型别名
pub type SynthesisResult<T> = Result<T, SynthesisError>;
