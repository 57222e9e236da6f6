//! 文件 gzip 压缩示例
//! 演示以流方式把文件压缩为 .gz，压缩过程不需要载入完整文件

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;

const SOURCE_FILE: &str = "demo-data/sample.txt";
const DEST_FILE: &str = "demo-data/sample.txt.gz";

fn main() -> Result<()> {
    println!("=== 文件 gzip 压缩示例 ===\n");

    let source = Path::new(SOURCE_FILE);
    let dest = Path::new(DEST_FILE);
    ensure_sample_file(source)?;

    // 读缓冲 -> gzip 编码器 -> 写缓冲
    let start = Instant::now();
    let mut reader = BufReader::new(File::open(source)?);
    let writer = BufWriter::new(File::create(dest)?);
    let mut encoder = GzEncoder::new(writer, Compression::best());
    io::copy(&mut reader, &mut encoder)?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    let duration = start.elapsed();

    let original = fs::metadata(source)?.len();
    let compressed = fs::metadata(dest)?.len();
    let ratio = 100.0 * compressed as f64 / original as f64;

    println!("原始文件: {} ({} 字节)", source.display(), original);
    println!("压缩文件: {} ({} 字节)", dest.display(), compressed);
    println!("压缩后大小为原始的 {:.2}%", ratio);
    println!("\n✅ 压缩完成，耗时 {:?}", duration);

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

    // 重复的文本内容，gzip 压缩效果明显
    let mut content = String::new();
    for i in 1..=4000 {
        content.push_str(&format!("这是示例文件的第 {} 行，用于演示 gzip 压缩。\n", i));
    }
    fs::write(path, content)?;
    println!("已生成示例文件: {}\n", path.display());

    Ok(())
}
