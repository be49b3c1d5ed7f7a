// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用配置
///
/// 加载顺序：内置默认值 < 配置文件 < 环境变量（`COLLECTRS` 前缀，
/// `__` 作为层级分隔符）。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 远端接口配置
    pub api: ApiSettings,
    /// 浏览器会话配置
    pub explorer: ExplorerSettings,
}

/// 远端接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// GraphQL 端点URL
    pub endpoint: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

/// 浏览器会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerSettings {
    /// 单域名 URL 数量上限
    pub urls_limit: u32,
    /// 单域名运行数量上限
    pub runs_limit: u32,
    /// 轮询间隔（秒）
    pub poll_interval_secs: u64,
}

impl Settings {
    /// 加载应用配置
    ///
    /// # 返回值
    ///
    /// * `Ok(Settings)` - 合并后的配置
    /// * `Err(ConfigError)` - 配置缺失或格式错误
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api.endpoint", "http://localhost:4000/graphql")?
            .set_default("api.timeout_secs", 30)?
            .set_default("explorer.urls_limit", 50)?
            .set_default("explorer.runs_limit", 80)?
            .set_default("explorer.poll_interval_secs", 15)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("COLLECTRS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 校验配置取值
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 配置有效
    /// * `Err(ConfigError)` - 取值越界或端点无效
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api.endpoint).is_err() {
            return Err(ConfigError::Message(format!(
                "api.endpoint 不是有效的URL: {}",
                self.api.endpoint
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "api.timeout_secs 必须大于 0".to_string(),
            ));
        }
        if self.explorer.urls_limit == 0 || self.explorer.runs_limit == 0 {
            return Err(ConfigError::Message(
                "explorer 限额必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
