// Format constants for quantized archives

// Zip entry names
pub const METADATA_ENTRY: &str = "metadata.csv";
pub const DATA_ENTRY: &str = "quantized.csv";

// Metadata table header columns
pub const COL_LENGTH: &str = "length";
pub const COL_MIN: &str = "min";
pub const COL_MAX: &str = "max";
pub const METADATA_HEADER: &str = "length,min,max";

pub const FIELD_SEPARATOR: char = ',';
pub const ROW_TERMINATOR: &str = "\r\n";

// 8-bit quantization unless the caller says otherwise
pub const DEFAULT_NUM_LEVELS: u32 = 256;
pub const MIN_NUM_LEVELS: u32 = 2;

// Precision of min/max in the metadata table (printf "%.6g")
pub const SIGNIFICANT_DIGITS: usize = 6;

// Deflate levels accepted by the zip writer
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

// Upper bound on buffer preallocation from a zip entry's declared size
pub const MAX_ENTRY_PREALLOC: u64 = 1 << 20;
