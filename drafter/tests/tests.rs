#[cfg(test)]
mod tests {
    use std::path::Path;

    use test_case::test_case;

    use drafter::config::DrafterConfig;
    use drafter::io;
    use hemline::io::export::export_sheet;
    use hemline::io::import::Importer;
    use hemline::io::svg::sheet_to_svg;
    use hemline::layout::pack_parts;

    #[test_case("../assets/apron.json"; "apron")]
    fn test_instance(instance_path: &str) {
        let config = DrafterConfig::default();

        let ext_draft = io::read_draft(Path::new(instance_path)).unwrap();
        let parts = Importer::new(config.draft)
            .import_draft(&ext_draft)
            .unwrap();
        assert_eq!(parts.len(), ext_draft.parts.len());

        let sheet = pack_parts(&parts, &config.draft).unwrap();
        assert_eq!(sheet.placements.len(), parts.len());
        assert!(sheet.width > 0.0 && sheet.height > 0.0);

        let ext_sheet = export_sheet(&parts, &sheet);
        let json = serde_json::to_string_pretty(&ext_sheet).unwrap();
        assert!(json.contains(&ext_draft.parts[0].name));

        let document = sheet_to_svg(&parts, &sheet, &config.svg).unwrap();
        assert!(document.to_string().contains("viewBox"));
    }
}
