/*! Static cell-type color table.

Maps human and mouse cell types onto the shared colors used for end-site annotation
tracks. The table is constant data with process lifetime; the lookup maps are built
once on first use and never mutated.
*/
use std::collections::HashMap;

use once_cell::sync::Lazy;


/// Color assignment for one pair of corresponding human/mouse cell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTypeColor {
    pub human_ct: Option<&'static str>,
    pub mouse_ct: Option<&'static str>,
    pub rgb: &'static str,
    pub color: &'static str,
}

const fn ct(
    human_ct: Option<&'static str>,
    mouse_ct: Option<&'static str>,
    rgb: &'static str,
    color: &'static str) -> CellTypeColor
{
    CellTypeColor { human_ct, mouse_ct, rgb, color }
}

pub const CELL_TYPE_COLORS: [CellTypeColor; 19] = [
    ct(Some("InterneuronsCGE_VIP"), Some("InhibNeuron"), "250,0,0", "Red"),
    ct(Some("AstrocytesProto"), Some("AstrocytesFibrous"), "250,150,0", "Orange"),
    ct(Some("InterneuronsMGE_PV"), Some("InhibNeuron"), "250,0,0", "Red"),
    ct(Some("ExciteDG"), Some("ExcitDG"), "0,150,0", "Green"),
    ct(Some("InterneuronsCGE_LAMP5"), Some("InhibNeuron"), "250,0,0", "Red"),
    ct(Some("GranuleNB"), Some("GranuleNB"), "0,150,0", "Green"),
    ct(Some("MFOLs"), Some("MFOLs"), "0,200,200", "Cyan"),
    ct(Some("OPCs"), Some("COPs"), "0,200,200", "Cyan"),
    ct(Some("ExciteCA"), Some("ExcitCA"), "0,150,0", "Green"),
    ct(Some("Microglia"), Some("Microglia"), "0,0,250", "DarkBlue"),
    ct(Some("InterneuronsMGE_SST"), Some("InhibNeuron"), "250,0,0", "Red"),
    ct(Some("VascFibro"), Some("Vasc"), "0,0,250", "DarkBlue"),
    ct(Some("AstrocytesFibrous"), Some("AstrocytesFibrous"), "250,150,0", "Orange"),
    ct(Some("MOLs"), Some("MOLs"), "0,200,200", "Cyan"),
    ct(Some("Macrophages"), Some("Macrophages"), "0,0,250", "DarkBlue"),
    ct(Some("VascEndo"), Some("Vasc"), "0,0,250", "DarkBlue"),
    ct(Some("Ependymal"), Some("Ependymal"), "250,0,250", "Pink"),
    ct(None, Some("InhCajalRetzius"), "250,0,0", "Red"),
    ct(None, Some("Progenitors"), "0,250,0", "LimeGreen"),
];

static HUMAN_CT_COLORS: Lazy<HashMap<&'static str, &'static CellTypeColor>> =
    Lazy::new(|| {
        CELL_TYPE_COLORS.iter()
            .filter_map(|color| color.human_ct.map(|name| (name, color)))
            .collect()
    });

static MOUSE_CT_COLORS: Lazy<HashMap<&'static str, &'static CellTypeColor>> =
    Lazy::new(|| {
        CELL_TYPE_COLORS.iter()
            .filter_map(|color| color.mouse_ct.map(|name| (name, color)))
            .collect()
    });

/// Looks up the color assignment of a human cell type.
pub fn human_cell_type_color(cell_type: &str) -> Option<&'static CellTypeColor> {
    HUMAN_CT_COLORS.get(cell_type).copied()
}

/// Looks up the color assignment of a mouse cell type.
pub fn mouse_cell_type_color(cell_type: &str) -> Option<&'static CellTypeColor> {
    MOUSE_CT_COLORS.get(cell_type).copied()
}
