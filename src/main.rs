fn main() -> anyhow::Result<()> {
    mesh_import_inspector::import_inspector::editor::run()
}
