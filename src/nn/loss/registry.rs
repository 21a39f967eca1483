use super::{LossLayer, SVMLoss, SoftMaxLoss};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

pub type LossConstructor = Box<dyn Fn() -> Box<dyn LossLayer>>;

/// 损失层注册表：小写名称 -> 构造函数
///
/// 由调用方持有并传给`Loss::new`，不存在全局状态。
///
/// ```
/// use only_symbol::nn::{Loss, LossRegistry};
///
/// let registry = LossRegistry::new();
/// assert_eq!(registry.names(), vec!["softmax", "svm"]);
/// assert!(Loss::new("SVM", &registry).is_ok());
/// ```
pub struct LossRegistry {
    constructors: BTreeMap<String, LossConstructor>,
}

impl Default for LossRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LossRegistry {
    /// 预先注册了`softmax`和`svm`的注册表
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<SoftMaxLoss>("softmax");
        registry.register::<SVMLoss>("svm");
        registry
    }

    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// 注册（或覆盖）名为`name`的损失层，名称不区分大小写
    pub fn register_loss(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Box<dyn LossLayer> + 'static,
    ) {
        let key = name.to_lowercase();
        if self
            .constructors
            .insert(key.clone(), Box::new(constructor))
            .is_some()
        {
            warn!("损失层{key}已注册过，旧的构造函数被覆盖");
        } else {
            debug!("注册损失层{key}");
        }
    }

    pub fn register<T: LossLayer + Default>(&mut self, name: &str) {
        self.register_loss(name, || Box::new(T::default()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&name.to_lowercase())
    }

    /// 已注册的名称（升序）
    pub fn names(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// 按名称（不区分大小写）实例化一个损失层，未注册时返回None
    pub fn create(&self, name: &str) -> Option<Box<dyn LossLayer>> {
        let key = name.to_lowercase();
        let layer = self.constructors.get(&key).map(|constructor| constructor());
        debug!("查找损失层{key}：{}", if layer.is_some() { "命中" } else { "未注册" });
        layer
    }
}

impl fmt::Debug for LossRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LossRegistry")
            .field("names", &self.names())
            .finish()
    }
}
