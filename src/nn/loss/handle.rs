use super::{LossError, LossLayer, LossRegistry};
use crate::kernel::Symbol;
use crate::tensor::Tensor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 按名称选出的损失层句柄
pub struct Loss {
    name: String,
    layer: Box<dyn LossLayer>,
}

impl Loss {
    /// 在`registry`中按名称（不区分大小写）实例化损失层
    ///
    /// # Errors
    /// 名称未注册时返回`LossError::InvalidArgument("No such loss: <name>")`
    pub fn new(name: &str, registry: &LossRegistry) -> Result<Self, LossError> {
        let layer = registry
            .create(name)
            .ok_or_else(|| LossError::InvalidArgument(format!("No such loss: {name}")))?;
        let name = name.to_lowercase();
        debug!("创建损失{name}（{}）", layer.name());
        Ok(Self { name, layer })
    }

    pub fn from_config(config: &LossConfig, registry: &LossRegistry) -> Result<Self, LossError> {
        Self::new(&config.name, registry)
    }

    pub fn loss_layer(&self) -> &dyn LossLayer {
        self.layer.as_ref()
    }

    /// 注册时使用的（小写）名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loss_function(
        &self,
        input: &Symbol,
        label_matrix: &Tensor,
    ) -> Result<Symbol, LossError> {
        Ok(self.layer.loss_function(input, label_matrix)?)
    }

    pub fn loss_function_with_label(
        &self,
        input: &Symbol,
        label_matrix: &Tensor,
    ) -> Result<(Symbol, Symbol), LossError> {
        Ok(self.layer.loss_function_with_label(input, label_matrix)?)
    }
}

impl fmt::Debug for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loss")
            .field("name", &self.name)
            .field("loss_type", &self.layer.loss_type())
            .finish()
    }
}

/// 损失的配置，如`{"name": "svm"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossConfig {
    pub name: String,
}

impl LossConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LossError> {
        serde_json::from_str(json).map_err(|e| LossError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LossError> {
        serde_json::to_string(self).map_err(|e| LossError::Config(e.to_string()))
    }
}
