//! 步态循环取消令牌
//!
//! 取消信号由 channel 承载，不使用共享布尔量。句柄侧发出取消
//! 或被丢弃，令牌侧都会在下一次轮询时观察到；一旦观察到即锁存，
//! 不会复位。

use std::cell::Cell;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// 创建一对取消句柄 / 令牌
///
/// 句柄交给控制线程，令牌交给步态循环。
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (
        CancelHandle { tx },
        CancelToken {
            rx,
            latched: Cell::new(false),
        },
    )
}

/// 取消句柄（控制线程侧）
///
/// 可克隆；任何一个克隆发出取消即生效。
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// 请求取消
    ///
    /// 幂等：重复调用与调用一次等效。
    pub fn cancel(&self) {
        let _ = self.tx.try_send(());
    }
}

/// 取消令牌（步态循环侧）
///
/// 步态循环在每个步的边界调用 [`CancelToken::is_cancelled`]。
#[derive(Debug)]
pub struct CancelToken {
    rx: Receiver<()>,
    latched: Cell<bool>,
}

impl CancelToken {
    /// 是否已请求取消
    ///
    /// 所有句柄都被丢弃也视为取消（通道断开即退出）。结果
    /// 锁存：一旦返回 `true`，之后恒为 `true`。
    pub fn is_cancelled(&self) -> bool {
        if self.latched.get() {
            return true;
        }

        match self.rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                self.latched.set(true);
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }
}
