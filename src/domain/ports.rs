/// 載入資料時所需的設定來源
pub trait ConfigProvider: Send + Sync {
    fn data_file_name(&self) -> &str;
    fn default_path(&self) -> &str;
    fn search_root(&self) -> &str;
}
