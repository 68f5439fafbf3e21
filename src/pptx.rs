// ABOUTME: PPTX generation module for the html2pptx application
// ABOUTME: Serializes a presentation into a PowerPoint package on disk

use crate::errors::{Html2PptxError, Result};
use crate::presentation::Presentation;
use async_trait::async_trait;
use image::ImageFormat;
use log::{info, warn};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

/// Persists a finished presentation. Takes ownership: the presentation is
/// not used after it has been written.
#[async_trait]
pub trait PresentationWriter: Send + Sync {
    async fn write(&self, presentation: Presentation, output_file: &Path) -> Result<()>;
}

/// Configuration for PPTX generation
#[derive(Debug, Clone)]
pub struct PptxConfig {
    pub title: String,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
        }
    }
}

/// Writes presentations as .pptx files
pub struct PptxWriter {
    config: PptxConfig,
}

impl PptxWriter {
    pub fn new(config: PptxConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PresentationWriter for PptxWriter {
    async fn write(&self, presentation: Presentation, output_file: &Path) -> Result<()> {
        let output_file = output_file.to_path_buf();
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || generate_pptx(&presentation, &output_file, &config))
            .await?
    }
}

/// Write `presentation` to `output_file`.
///
/// The package is assembled in a temporary file next to the target and moved
/// into place once complete.
pub fn generate_pptx(
    presentation: &Presentation,
    output_file: &Path,
    config: &PptxConfig,
) -> Result<()> {
    info!(
        "Generating PPTX with {} slides at {:?}",
        presentation.slide_count(),
        output_file
    );

    let temp_file = temp_path_for(output_file);
    let result = fs::File::create(&temp_file)
        .map_err(Html2PptxError::FileError)
        .and_then(|file| write_package(file, presentation, config))
        .and_then(|_| fs::rename(&temp_file, output_file).map_err(Html2PptxError::FileError));

    if let Err(e) = result {
        if temp_file.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_file) {
                warn!("Failed to clean up temp file {:?}: {}", temp_file, cleanup);
            }
        }
        return Err(e);
    }

    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

fn temp_path_for(output_file: &Path) -> PathBuf {
    let file_name = output_file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "presentation.pptx".to_string());
    output_file.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
}

/// File extension for a slide image, based on its content
fn image_extension(data: &[u8], slide_num: usize) -> Result<&'static str> {
    match image::guess_format(data) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpeg"),
        Ok(other) => Err(Html2PptxError::Serialization(format!(
            "Slide {} has unsupported image format {:?}",
            slide_num, other
        ))),
        Err(e) => Err(Html2PptxError::Serialization(format!(
            "Slide {} image is not recognisable: {}",
            slide_num, e
        ))),
    }
}

fn write_package<W: Write + Seek>(
    writer: W,
    presentation: &Presentation,
    config: &PptxConfig,
) -> Result<()> {
    let slides = presentation.slides();
    let layout = presentation.layout();
    let (cx, cy) = layout.size_emu();

    let extensions = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| image_extension(&slide.image, i + 1))
        .collect::<Result<Vec<_>>>()?;

    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default();

    // Add [Content_Types].xml
    info!("Creating PPTX structure: [Content_Types].xml");
    zip.start_file("[Content_Types].xml", options)?;
    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="jpeg" ContentType="image/jpeg"/>
    <Default Extension="png" ContentType="image/png"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
    <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
    <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
    <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
{slides}
</Types>"#,
        slides = (1..=slides.len())
            .map(|n| format!(r#"    <Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#, n))
            .collect::<Vec<String>>()
            .join("\n")
    );
    zip.write_all(content_types.as_bytes())?;

    info!("Creating PPTX structure: _rels/.rels");
    zip.start_file("_rels/.rels", options)?;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
    zip.write_all(rels.as_bytes())?;

    info!("Creating PPTX structure: docProps/app.xml");
    zip.start_file("docProps/app.xml", options)?;
    let app_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>html2pptx</Application>
    <PresentationFormat>{}</PresentationFormat>
    <Slides>{}</Slides>
</Properties>"#,
        escape_xml(&layout.format_name()),
        slides.len()
    );
    zip.write_all(app_xml.as_bytes())?;

    info!("Creating PPTX structure: docProps/core.xml");
    zip.start_file("docProps/core.xml", options)?;
    let core_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>html2pptx</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        escape_xml(&config.title),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    zip.write_all(core_xml.as_bytes())?;

    info!("Creating PPTX structure: ppt/_rels/presentation.xml.rels");
    zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
    let mut pres_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for n in 1..=slides.len() {
        pres_rels.push_str(&format!(
            r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            n, n
        ));
        pres_rels.push('\n');
    }
    pres_rels.push_str(r#"    <Relationship Id="rIdMaster1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
    <Relationship Id="rIdTheme1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#);
    pres_rels.push_str("</Relationships>");
    zip.write_all(pres_rels.as_bytes())?;

    info!("Creating PPTX structure: ppt/presentation.xml");
    zip.start_file("ppt/presentation.xml", options)?;
    let presentation_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:sldMasterIdLst>
        <p:sldMasterId id="2147483648" r:id="rIdMaster1"/>
    </p:sldMasterIdLst>
    <p:sldIdLst>
{slide_ids}
    </p:sldIdLst>
    <p:sldSz cx="{cx}" cy="{cy}"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
        slide_ids = (1..=slides.len())
            .map(|n| format!(r#"        <p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n))
            .collect::<Vec<String>>()
            .join("\n"),
        cx = cx,
        cy = cy
    );
    zip.write_all(presentation_xml.as_bytes())?;

    // A single blank master and layout shared by every slide
    for (name, content) in [
        ("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML),
        ("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS),
        ("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML),
        ("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS),
        ("ppt/theme/theme1.xml", THEME_XML),
    ] {
        info!("Creating PPTX structure: {}", name);
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    for (i, (slide, ext)) in slides.iter().zip(&extensions).enumerate() {
        let slide_num = i + 1;
        info!("Processing slide {}: {:?}", slide_num, slide.source);

        let image_name = format!("image{}.{}", slide_num, ext);
        zip.start_file(
            format!("ppt/media/{}", image_name),
            options.compression_method(CompressionMethod::Stored),
        )?;
        zip.write_all(&slide.image)?;

        zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", slide_num), options)?;
        let slide_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#,
            image_name
        );
        zip.write_all(slide_rels.as_bytes())?;

        zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
        zip.write_all(slide_xml(slide_num, cx, cy).as_bytes())?;
    }

    info!("Finalizing PPTX file");
    zip.finish()?;
    Ok(())
}

/// Slide part holding one full-page picture
fn slide_xml(slide_num: usize, cx: u64, cy: u64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
            <p:pic>
                <p:nvPicPr>
                    <p:cNvPr id="2" name="Slide {slide_num}"/>
                    <p:cNvPicPr>
                        <a:picLocks noChangeAspect="1"/>
                    </p:cNvPicPr>
                    <p:nvPr/>
                </p:nvPicPr>
                <p:blipFill>
                    <a:blip r:embed="rId1"/>
                    <a:stretch>
                        <a:fillRect/>
                    </a:stretch>
                </p:blipFill>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="0" y="0"/>
                        <a:ext cx="{cx}" cy="{cy}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
            </p:pic>
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sld>"#,
        slide_num = slide_num,
        cx = cx,
        cy = cy
    )
}

const SLIDE_MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr/>
        </p:spTree>
    </p:cSld>
    <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
    <p:sldLayoutIdLst>
        <p:sldLayoutId id="2147483649" r:id="rId1"/>
    </p:sldLayoutIdLst>
</p:sldMaster>"#;

const SLIDE_MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#;

const SLIDE_LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
    <p:cSld name="Blank">
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr/>
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sldLayout>"#;

const SLIDE_LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
    <a:themeElements>
        <a:clrScheme name="Office">
            <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
            <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
            <a:dk2><a:srgbClr val="44546A"/></a:dk2>
            <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
            <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
            <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
            <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
            <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
            <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
            <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
            <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
            <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
        </a:clrScheme>
        <a:fontScheme name="Office">
            <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
            <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
        </a:fontScheme>
        <a:fmtScheme name="Office">
            <a:fillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:fillStyleLst>
            <a:lnStyleLst>
                <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
            </a:lnStyleLst>
            <a:effectStyleLst>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
            </a:effectStyleLst>
            <a:bgFillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:bgFillStyleLst>
        </a:fmtScheme>
    </a:themeElements>
</a:theme>"#;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
