use std::process::ExitCode;

use image_convert::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(output_dir) => {
            log::info!("程式執行完成，輸出目錄：{}", output_dir);
            println!("轉換完成！輸出檔案位於：{}", output_dir);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.notification());
            ExitCode::FAILURE
        }
    }
}
