use crate::catalog::{GarmentType, GarmentView};

/// Logical size of every built-in silhouette document.
pub(crate) const SILHOUETTE_WIDTH: u32 = 400;
pub(crate) const SILHOUETTE_HEIGHT: u32 = 480;

const FILL: &str = "#f5f5f5";
const STROKE: &str = "#b4b4b4";
const SEAM: &str = "#d0d0d0";

/// Build a flat vector garment for a garment/view pair.
///
/// These stand in for photographic templates when no asset directory is configured. The fill is
/// near-white so the tint filter reads the same way it does on real template photos.
pub(crate) fn silhouette_svg(garment: GarmentType, view: GarmentView) -> String {
    let mut parts = Vec::<String>::new();

    match view {
        GarmentView::Front | GarmentView::Back => {
            let neck_depth = if view == GarmentView::Front { 72 } else { 52 };
            parts.push(body_path(garment, neck_depth));
            match (garment, view) {
                (GarmentType::Hoodie, GarmentView::Front) => {
                    parts.push(shape(
                        "M160,48 Q150,4 200,4 Q250,4 240,48 Q200,88 160,48 Z",
                        FILL,
                    ));
                    parts.push(seam("M140,330 L260,330 L285,420 L115,420 Z"));
                    parts.push(seam("M188,70 L184,130 M212,70 L216,130"));
                }
                (GarmentType::Hoodie, GarmentView::Back) => {
                    parts.push(shape(
                        "M156,52 Q146,0 200,0 Q254,0 244,52 Q200,70 156,52 Z",
                        FILL,
                    ));
                    parts.push(seam("M200,4 L200,58"));
                }
                (GarmentType::Polo, GarmentView::Front) => {
                    parts.push(shape("M160,40 L200,76 L240,40 L232,28 L200,56 L168,28 Z", FILL));
                    parts.push(seam("M192,76 L208,76 L208,142 L192,142 Z"));
                    parts.push(button(200.0, 96.0));
                    parts.push(button(200.0, 122.0));
                }
                (GarmentType::Polo, GarmentView::Back) => {
                    parts.push(shape("M160,40 Q200,58 240,40 L234,26 Q200,42 166,26 Z", FILL));
                }
                _ => {}
            }
            parts.push(seam("M110,440 L290,440"));
        }
        GarmentView::Side => {
            parts.push(side_body_path(garment));
            match garment {
                GarmentType::Hoodie => {
                    parts.push(shape(
                        "M150,62 Q120,10 180,6 Q236,4 232,54 Q196,64 150,62 Z",
                        FILL,
                    ));
                }
                GarmentType::Polo => {
                    parts.push(shape("M150,60 L232,50 L236,36 L154,44 Z", FILL));
                }
                GarmentType::Tshirt => {}
            }
            parts.push(seam("M146,440 L250,440"));
        }
    }

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            "{body}",
            "</svg>"
        ),
        w = SILHOUETTE_WIDTH,
        h = SILHOUETTE_HEIGHT,
        body = parts.join("")
    )
}

fn body_path(garment: GarmentType, neck_depth: u32) -> String {
    let d = match garment {
        GarmentType::Hoodie => format!(
            "M120,70 L165,45 Q200,{n} 235,45 L280,70 L350,160 L388,400 L346,412 L300,210 \
             L300,450 L100,450 L100,210 L54,412 L12,400 L50,160 Z",
            n = neck_depth
        ),
        GarmentType::Tshirt | GarmentType::Polo => format!(
            "M120,60 L160,40 Q200,{n} 240,40 L280,60 L370,120 L335,188 L300,168 \
             L300,450 L100,450 L100,168 L65,188 L30,120 Z",
            n = neck_depth
        ),
    };
    shape(&d, FILL)
}

fn side_body_path(garment: GarmentType) -> String {
    let torso = "M150,60 L232,50 L256,72 L252,450 L140,450 L146,180 L138,70 Z";
    let sleeve = match garment {
        GarmentType::Hoodie => "M176,70 L222,66 L250,250 L232,420 L198,418 L206,250 Z",
        GarmentType::Tshirt | GarmentType::Polo => "M172,66 L226,62 L246,170 L196,184 Z",
    };
    format!("{}{}", shape(torso, FILL), shape(sleeve, FILL))
}

fn shape(d: &str, fill: &str) -> String {
    format!(r#"<path d="{d}" fill="{fill}" stroke="{STROKE}" stroke-width="3" stroke-linejoin="round"/>"#)
}

fn seam(d: &str) -> String {
    format!(r#"<path d="{d}" fill="none" stroke="{SEAM}" stroke-width="2" stroke-dasharray="6 4"/>"#)
}

fn button(cx: f64, cy: f64) -> String {
    format!(r#"<circle cx="{cx}" cy="{cy}" r="4" fill="{SEAM}" stroke="{STROKE}" stroke-width="1"/>"#)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/silhouette.rs"]
mod tests;
