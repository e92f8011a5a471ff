use honggfuzz::fuzz;
use prism_tools::{parse_records, render_header, CompileMode, LatentTable};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(records) = parse_records(data) {
                for mode in [CompileMode::Lenient, CompileMode::Strict] {
                    if let Ok(table) = LatentTable::compile(&records, mode) {
                        let _ = render_header(&table);
                    }
                }
            }
        });
    }
}
