// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::DateTime;

/// 将 ISO-8601 时间戳解析为毫秒级 epoch 值
///
/// 远端接口的所有时间戳均以 ISO-8601 字符串传输。解析失败时返回 `0`，
/// 表示"无序"：消费方在按时间排序前必须过滤掉非正值，但此类记录
/// 仍可出现在按状态枚举的列表中（例如进行中的运行列表）。
///
/// # 参数
///
/// * `iso` - ISO-8601 格式的时间戳字符串
///
/// # 返回值
///
/// * 毫秒级 epoch 值，解析失败时为 `0`
pub fn to_epoch_ms(iso: &str) -> i64 {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// 按优先级链选取首个非空时间戳并解析
///
/// 时间轴位置规则的通用实现：依序取第一个存在的候选字段。
/// 若候选全部为空或首个非空值无法解析，返回 `0`。
pub fn position_of(candidates: &[Option<&str>]) -> i64 {
    candidates
        .iter()
        .find_map(|c| *c)
        .map(to_epoch_ms)
        .unwrap_or(0)
}
