//! 文件流式读取示例
//! 演示如何分块读取大文件，而不是一次性载入内存

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Local};

/// 每次读取的块大小（64 KB）
const CHUNK_SIZE: usize = 64 * 1024;

const SAMPLE_FILE: &str = "demo-data/sample.txt";

fn main() -> Result<()> {
    println!("=== 文件流式读取示例 ===\n");

    let path = Path::new(SAMPLE_FILE);
    ensure_sample_file(path)?;

    // 显示文件信息
    let metadata = fs::metadata(path)?;
    let modified: DateTime<Local> = metadata.modified()?.into();
    println!("文件: {}", path.display());
    println!("大小: {}", format_bytes(metadata.len()));
    println!("修改时间: {}\n", modified.format("%Y-%m-%d %H:%M:%S"));

    // 分块读取，固定大小的缓冲区重复使用
    let start = Instant::now();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut chunk_count = 0u32;
    let mut total_bytes = 0u64;

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        chunk_count += 1;
        total_bytes += n as u64;
        println!("读取块 {}: {}", chunk_count, format_bytes(n as u64));
    }

    let duration = start.elapsed();
    println!(
        "\n✅ 读取完成: 共 {} 块，{}，耗时 {:?}",
        chunk_count,
        format_bytes(total_bytes),
        duration
    );

    Ok(())
}

/// 示例文件不存在时生成一个
fn ensure_sample_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = String::new();
    for i in 1..=4000 {
        content.push_str(&format!("这是示例文件的第 {} 行，用于演示流式读取。\n", i));
    }
    fs::write(path, content)?;
    println!("已生成示例文件: {}\n", path.display());

    Ok(())
}

/// 字节数的可读格式
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
