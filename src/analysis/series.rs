use crate::data::{Region, TacDataset};
use crate::error::{TacError, TacResult};
use crate::utils::config::PlotConfig;
use serde::{Deserialize, Serialize};

/// One labeled line on the TAC chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub region: Region,
    pub label: String,
    /// (seconds, counts)
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw the TAC chart, independent of any backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<CurveSeries>,
}

impl PlotSeries {
    /// Take the first `points` samples of each region against the time axis
    ///
    /// Fails if the time axis or either curve is shorter than `points`.
    pub fn from_dataset(dataset: &TacDataset, points: usize, labels: &PlotConfig) -> TacResult<Self> {
        let axis = dataset.time_axis();
        if axis.len() < points {
            return Err(TacError::invalid(format!(
                "plot needs {} points but time axis has {}",
                points,
                axis.len()
            )));
        }

        let curves = [Region::Liver, Region::Heart]
            .into_iter()
            .map(|region| {
                let counts = dataset.counts(region);
                if counts.len() < points {
                    return Err(TacError::invalid(format!(
                        "plot needs {} points but {} curve has {}",
                        points,
                        region.label(),
                        counts.len()
                    )));
                }
                Ok(CurveSeries {
                    region,
                    label: region.label().to_string(),
                    points: axis[..points]
                        .iter()
                        .zip(&counts[..points])
                        .map(|(&t, &c)| (t as f64, c))
                        .collect(),
                })
            })
            .collect::<TacResult<Vec<_>>>()?;

        Ok(Self {
            title: labels.title.clone(),
            x_label: labels.x_label.clone(),
            y_label: labels.y_label.clone(),
            curves,
        })
    }

    /// Bounding box of all points as ((x_min, x_max), (y_min, y_max))
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.curves.iter().flat_map(|c| c.points.iter());
        let &(x0, y0) = points.next()?;
        Some(points.fold(((x0, x0), (y0, y0)), |((xl, xh), (yl, yh)), &(x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}
