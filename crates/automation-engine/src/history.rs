//! 执行历史存储
//!
//! 所有执行共享同一个历史存储。内存实现使用 `parking_lot::RwLock` 保护的环形缓冲，
//! 容量检查与追加在同一把写锁内完成，读取时复制出一致的快照。

use std::collections::VecDeque;

use parking_lot::RwLock;
use tracing::debug;

use crate::models::Execution;

/// 执行历史存储
pub trait HistoryStore: Send + Sync {
    /// 追加一条执行记录，超出容量时淘汰最旧的记录
    fn append(&self, execution: Execution);

    /// 按追加顺序（最旧在前）返回快照，可按规则 ID 过滤
    fn snapshot(&self, rule_id: Option<&str>) -> Vec<Execution>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&self);
}

/// 有界内存历史存储（FIFO 淘汰）
pub struct InMemoryHistoryStore {
    entries: RwLock<VecDeque<Execution>>,
    capacity: usize,
}

impl InMemoryHistoryStore {
    /// 创建存储，容量至少为 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, execution: Execution) {
        let mut entries = self.entries.write();
        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!(execution_id = %evicted.id, "历史已满，淘汰最旧记录");
            }
        }
        entries.push_back(execution);
    }

    fn snapshot(&self, rule_id: Option<&str>) -> Vec<Execution> {
        let entries = self.entries.read();
        entries
            .iter()
            .filter(|e| rule_id.is_none_or(|id| e.rule_id == id))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}
