use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lower-cased publisher name (or a distinctive part of it) to short code.
const PUBLISHER_SHORT_NAMES: &[(&str, &str)] = &[
    ("acm books", "MaC"),
    ("academic press", "AP"),
    ("apress", "Apress"),
    ("addison-wesley", "AW"),
    ("bcs", "BCS"),
    ("bpb", "BPB"),
    ("birkhäuser", "Springer"),
    ("cisco", "Cisco"),
    ("cengage", "CL"),
    ("course technology", "CL"),
    ("south-western college publishing", "CL"),
    ("apple academic press", "CRC"),
    ("auerbach", "CRC"),
    ("chapman", "CRC"),
    ("crc", "CRC"),
    ("taylor & francis", "CRC"),
    ("taylor and francis", "CRC"),
    ("cambridge university press", "CUP"),
    ("de gruyter", "DG"),
    ("de|g", "DG"),
    ("dk", "DK"),
    ("dk children", "DK"),
    ("dorling kindersley", "DK"),
    ("esri", "Esri"),
    ("for dummies", "FD"),
    ("iet standards", "IET"),
    ("ivy press", "Ivy"),
    ("of engineering and technology", "IET"),
    ("of engineering & technology", "IET"),
    ("jones & bartlett", "JBL"),
    ("jones and bartlett", "JBL"),
    ("manning", "Manning"),
    ("make community", "Make"),
    ("maker media", "Make"),
    ("morgan & claypool", "MaC"),
    ("morgan and claypool", "MaC"),
    ("mit press", "MIT"),
    ("microsoft", "Microsoft"),
    ("mcgraw-hill", "MGH"),
    ("mcgraw hill", "MGH"),
    ("mercury learning", "ML"),
    ("morgan kaufmann", "MK"),
    ("newnes", "Newnes"),
    ("nova", "Nova"),
    ("no starch", "NSP"),
    ("oreilly", "OReilly"),
    ("o'reilly", "OReilly"),
    ("o′reilly", "OReilly"),
    ("oxford university press", "OUP"),
    ("oup oxford", "OUP"),
    ("packt", "Packt"),
    ("pearson", "Pearson"),
    ("pragmatic", "Pragmatic"),
    ("princeton", "Princeton"),
    ("razeware", "Razeware"),
    ("river publishers", "River"),
    ("sams", "Sams"),
    ("springer", "Springer"),
    ("wiley", "Wiley"),
    ("world scientific", "WSPC"),
];

static EXACT: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PUBLISHER_SHORT_NAMES.iter().copied().collect());

// Longest key first, ties alphabetical, so overlapping keys resolve the same way every time.
static BY_LENGTH: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut entries = PUBLISHER_SHORT_NAMES.to_vec();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
    entries
});

/// Maps a full publisher name to its short code. Unknown names are returned
/// unchanged.
pub fn canonicalize_publisher_name(full_name: &str) -> String {
    let lower = full_name.to_lowercase();

    if let Some(short) = EXACT.get(lower.as_str()) {
        return short.to_string();
    }

    BY_LENGTH
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| full_name.to_string())
}
