use std::io::{self, Write};

use serde::Serialize;

use crate::equation::equationresult::Point2D;
use crate::math::curve::curve::Curve;
use crate::plot::samplingwindow::SamplingWindow;

/// Points of a curve ready to hand to an external plotter.
///
/// Abscissas where the curve is undefined or infinite are left out, so a
/// series may hold fewer points than the window asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    label: String,
    points: Vec<Point2D>
}

impl PlotSeries {
    pub fn sample<C: Curve + ?Sized>(label: &str, curve: &C, window: &SamplingWindow) -> PlotSeries {
        let points = window
            .abscissas()
            .map(|x| Point2D::new(x, curve.value(x)))
            .filter(|point| point.y().is_finite())
            .collect();
        PlotSeries { label: label.to_owned(), points }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// `x,y` header followed by one line per point.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "x,y")?;
        for point in &self.points {
            writeln!(writer, "{},{}", point.x(), point.y())?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::equation::Equation;

    #[test]
    fn samples_every_point_of_a_polynomial() {
        let line = Equation::Linear { a: 2.0, b: 1.0 };
        let window = SamplingWindow::new(0.0, 2.0, 3).unwrap();
        let series = PlotSeries::sample("2x + 1", &line, &window);
        assert_eq!(
            series.points(),
            &[Point2D::new(0.0, 1.0), Point2D::new(1.0, 3.0), Point2D::new(2.0, 5.0)]
        );
    }

    #[test]
    fn drops_undefined_points() {
        let logarithm = Equation::Logarithmic { a: 1.0, b: 10.0 };
        let window = SamplingWindow::new(-1.0, 1.0, 3).unwrap();
        let series = PlotSeries::sample("log", &logarithm, &window);
        assert_eq!(series.points(), &[Point2D::new(1.0, 0.0)]);
    }

    #[test]
    fn writes_csv() {
        let line = Equation::Linear { a: 1.0, b: 0.0 };
        let window = SamplingWindow::new(0.0, 1.0, 2).unwrap();
        let mut buffer = Vec::new();
        PlotSeries::sample("x", &line, &window).write_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "x,y\n0,0\n1,1\n");
    }
}
