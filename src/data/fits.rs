use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use fitsio::hdu::HduInfo;
use fitsio::FitsFile;

use super::model::{TargetData, TargetInfo};

// ---------------------------------------------------------------------------
// eleanor light-curve table
// ---------------------------------------------------------------------------

/// Columns of the binary table in HDU 1 of an eleanor light-curve product.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurveTable {
    pub time: Vec<f64>,
    pub quality: Vec<i32>,
    pub raw_flux: Vec<f64>,
    pub corr_flux: Vec<f64>,
    /// Absent from products built without co-trending vectors.
    pub pca_flux: Option<Vec<f64>>,
}

impl LightCurveTable {
    pub fn into_target_data(self, target: TargetInfo) -> TargetData {
        TargetData {
            target,
            time: self.time,
            quality: self.quality,
            raw_flux: self.raw_flux,
            corr_flux: self.corr_flux,
            pca_flux: self.pca_flux,
        }
    }
}

fn fits_err(e: fitsio::errors::Error) -> anyhow::Error {
    anyhow!("{e}")
}

/// Read `TIME`, `QUALITY`, `RAW_FLUX`, `CORR_FLUX` and, when present,
/// `PCA_FLUX` from the first extension of `path`.
pub fn read_light_curve(path: &Path) -> Result<LightCurveTable> {
    let mut fits = FitsFile::open(path)
        .map_err(fits_err)
        .with_context(|| format!("opening FITS file {}", path.display()))?;
    let hdu = fits
        .hdu(1)
        .map_err(fits_err)
        .context("reading light curve extension (HDU 1)")?;

    let columns: Vec<String> = match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => column_descriptions.iter().map(|c| c.name.clone()).collect(),
        _ => bail!("HDU 1 is not a binary table"),
    };
    log::debug!("{}: columns {:?}", path.display(), columns);

    let has = |name: &str| columns.iter().any(|c| c.eq_ignore_ascii_case(name));
    for required in ["TIME", "QUALITY", "RAW_FLUX", "CORR_FLUX"] {
        if !has(required) {
            bail!("light curve table has no {required} column");
        }
    }

    let mut read_f64 = |name: &str| -> Result<Vec<f64>> {
        hdu.read_col::<f64>(&mut fits, name)
            .map_err(fits_err)
            .with_context(|| format!("reading column {name}"))
    };
    let time = read_f64("TIME")?;
    let raw_flux = read_f64("RAW_FLUX")?;
    let corr_flux = read_f64("CORR_FLUX")?;
    let pca_flux = if has("PCA_FLUX") {
        Some(read_f64("PCA_FLUX")?)
    } else {
        None
    };
    let quality = hdu
        .read_col::<i32>(&mut fits, "QUALITY")
        .map_err(fits_err)
        .context("reading column QUALITY")?;

    Ok(LightCurveTable {
        time,
        quality,
        raw_flux,
        corr_flux,
        pca_flux,
    })
}

#[cfg(test)]
mod tests {
    use fitsio::tables::{ColumnDataType, ColumnDescription};

    use super::*;

    fn write_product(path: &Path, with_pca: bool) {
        let mut names = vec![
            ("TIME", ColumnDataType::Double),
            ("QUALITY", ColumnDataType::Int),
            ("RAW_FLUX", ColumnDataType::Double),
            ("CORR_FLUX", ColumnDataType::Double),
        ];
        if with_pca {
            names.push(("PCA_FLUX", ColumnDataType::Double));
        }
        let descriptions: Vec<_> = names
            .into_iter()
            .map(|(name, ty)| ColumnDescription::new(name).with_type(ty).create().unwrap())
            .collect();

        let mut fits = FitsFile::create(path).open().unwrap();
        let hdu = fits
            .create_table("LIGHTCURVE".to_string(), &descriptions)
            .unwrap();
        hdu.write_col(&mut fits, "TIME", &[1325.3, 1325.4, 1325.5])
            .unwrap();
        hdu.write_col(&mut fits, "QUALITY", &[0i32, 128, 0]).unwrap();
        hdu.write_col(&mut fits, "RAW_FLUX", &[10.0, 11.0, 12.0])
            .unwrap();
        hdu.write_col(&mut fits, "CORR_FLUX", &[20.0, 21.0, 22.0])
            .unwrap();
        if with_pca {
            hdu.write_col(&mut fits, "PCA_FLUX", &[30.0, 31.0, 32.0])
                .unwrap();
        }
    }

    #[test]
    fn reads_eleanor_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lc.fits");
        write_product(&path, true);

        let table = read_light_curve(&path).unwrap();
        assert_eq!(table.time, vec![1325.3, 1325.4, 1325.5]);
        assert_eq!(table.quality, vec![0, 128, 0]);
        assert_eq!(table.corr_flux, vec![20.0, 21.0, 22.0]);
        assert_eq!(table.pca_flux, Some(vec![30.0, 31.0, 32.0]));
    }

    #[test]
    fn missing_pca_column_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lc.fits");
        write_product(&path, false);

        let table = read_light_curve(&path).unwrap();
        assert_eq!(table.raw_flux, vec![10.0, 11.0, 12.0]);
        assert!(table.pca_flux.is_none());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.fits");
        let err = read_light_curve(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.fits"));
    }
}
