//! API 测试：文件加载、配置文件与执行编排

use octet_api::{
    load_config, load_program, run_captured, Halt, OctetError, RunConfig, StallPolicy,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file_with(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_program_reads_whole_file() {
    let file = temp_file_with(&[0x06, b'H', 0x06, b'i', 0x00]);
    let program = load_program(file.path()).unwrap();
    assert_eq!(program, vec![0x06, b'H', 0x06, b'i', 0x00]);

    let (output, stdout) = run_captured(program, &RunConfig::default()).unwrap();
    assert_eq!(stdout, b"Hi");
    assert_eq!(output.halt, Halt::End { offset: 4 });
}

#[test]
fn test_load_missing_program() {
    let dir = tempfile::tempdir().unwrap();
    let error = load_program(dir.path().join("nope.bin")).unwrap_err();
    assert!(matches!(error, OctetError::Load { .. }));
    assert!(error.to_string().contains("nope.bin"));
}

#[test]
fn test_empty_program_terminates() {
    let file = temp_file_with(&[]);
    let program = load_program(file.path()).unwrap();
    let (output, stdout) = run_captured(program, &RunConfig::default()).unwrap();
    assert!(stdout.is_empty());
    assert_eq!(output.halt, Halt::OutOfBounds { ip: 0 });
}

#[test]
fn test_config_file_drives_run() {
    let file = temp_file_with(
        br#"{
            "vm": {
                "opcodes": { "print": 112, "end": 101 },
                "limits": { "max_steps": 10 },
                "stall": "halt"
            },
            "log": { "level": "info" }
        }"#,
    );
    let config = RunConfig::from_config(&load_config(file.path()).unwrap());
    assert_eq!(config.vm.stall, StallPolicy::Halt);

    let (output, stdout) = run_captured(b"pApBe".to_vec(), &config).unwrap();
    assert_eq!(stdout, b"AB");
    assert_eq!(output.halt, Halt::End { offset: 4 });
}

#[test]
fn test_step_limit_from_config_stops_infinite_jump() {
    let mut config = RunConfig::default();
    config.vm.limits.max_steps = Some(1000);
    let (output, _) = run_captured(vec![0x01, 0x00, 0x00], &config).unwrap();
    assert_eq!(output.halt, Halt::StepLimit { steps: 1000 });
    assert!(!output.is_success());
}

#[test]
fn test_bad_config_file() {
    let file = temp_file_with(br#"{ "vm": { "opcodes": { "end": 6 } } }"#);
    let error = load_config(file.path()).unwrap_err();
    assert!(matches!(error, OctetError::Config(_)));
    assert_eq!(error.phase(), "config");

    let file = temp_file_with(b"not json");
    assert!(matches!(
        load_config(file.path()).unwrap_err(),
        OctetError::Config(_)
    ));
}
