fn main() {
    // Embed Windows resources (version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "AndroidTBox Config Manager");
        res.set("FileDescription", "AndroidTBox configuration snapshot manager");
        res.set("CompanyName", "tbox-config-manager contributors");
        res.set("OriginalFilename", "tbox-config-manager.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
