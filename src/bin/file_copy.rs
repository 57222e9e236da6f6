//! 文件流式拷贝示例
//! 演示通过缓冲读写流拷贝文件，内存占用和文件大小无关

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

const SOURCE_FILE: &str = "demo-data/sample.txt";
const DEST_FILE: &str = "demo-data/sample_copy.txt";

fn main() -> Result<()> {
    println!("=== 文件流式拷贝示例 ===\n");

    let source = Path::new(SOURCE_FILE);
    let dest = Path::new(DEST_FILE);
    ensure_sample_file(source)?;

    // 读缓冲 -> 写缓冲，io::copy 内部分块搬运
    let start = Instant::now();
    let mut reader = BufReader::new(File::open(source)?);
    let mut writer = BufWriter::new(File::create(dest)?);
    let copied = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    let duration = start.elapsed();

    let source_len = fs::metadata(source)?.len();
    let dest_len = fs::metadata(dest)?.len();

    println!("源文件:   {} ({} 字节)", source.display(), source_len);
    println!("目标文件: {} ({} 字节)", dest.display(), dest_len);
    println!("\n✅ 拷贝完成: {} 字节，耗时 {:?}", copied, duration);

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
        content.push_str(&format!("这是示例文件的第 {} 行，用于演示流式拷贝。\n", i));
    }
    fs::write(path, content)?;
    println!("已生成示例文件: {}\n", path.display());

    Ok(())
}
