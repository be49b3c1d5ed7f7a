// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

#[test]
fn test_default_settings() {
    let settings = Settings::new().unwrap();

    assert_eq!(settings.api.endpoint, "http://localhost:4000/graphql");
    assert_eq!(settings.api.timeout_secs, 30);
    assert_eq!(settings.explorer.urls_limit, 50);
    assert_eq!(settings.explorer.runs_limit, 80);
    assert_eq!(settings.explorer.poll_interval_secs, 15);
}

#[test]
fn test_default_settings_are_valid() {
    let settings = Settings::new().unwrap();
    assert!(settings.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_endpoint() {
    let mut settings = Settings::new().unwrap();
    settings.api.endpoint = "not-a-url".to_string();

    assert!(settings.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_limits() {
    let mut settings = Settings::new().unwrap();
    settings.explorer.urls_limit = 0;

    assert!(settings.validate().is_err());
}
