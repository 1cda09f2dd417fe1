// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    common::{CustomerId, DepotId, TimeWindow, VehicleTypeId},
    problem::{
        arcs::ArcMatrix,
        customer::Customer,
        depot::Depot,
        err::InstanceLoadError,
        instance::Instance,
        vehicle::VehicleClass,
    },
};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Loads an instance from a directory of CSV files:
///
/// - `customer_nodes.csv`: `id,x,y,demand,service_time,window_open,window_close`
/// - `depot_nodes.csv`: `id,x,y,capacity,cost_per_load,fixed_cost,mandatory,
///   share_min,share_max,window_open,window_close`
/// - `vehicles.csv`: `depot_id,type,count,capacity,range,speed,fuel_time,
///   load_time,stop_time,max_shift,max_routes,cost_per_distance,
///   cost_per_time,fixed_cost`
/// - `arcs.csv` (optional): one row of `C+D` lengths per node, customers
///   first in file order, then depots. When absent, lengths fall back to
///   Euclidean distances over the node coordinates.
///
/// The directory name doubles as the instance name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader {
    euclidean_fallback: bool,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self {
            euclidean_fallback: true,
        }
    }
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// When disabled, a missing `arcs.csv` is a load error instead of a
    /// Euclidean fallback.
    #[inline]
    pub fn euclidean_fallback(mut self, yes: bool) -> Self {
        self.euclidean_fallback = yes;
        self
    }

    pub fn from_dir(&self, dir: impl AsRef<Path>) -> Result<Instance, InstanceLoadError> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("instance")
            .to_string();

        let customers = self.load_customers(&dir.join("customer_nodes.csv"))?;
        let fleets = self.load_fleets(&dir.join("vehicles.csv"))?;
        let depots = self.load_depots(&dir.join("depot_nodes.csv"), fleets)?;

        let arcs_path = dir.join("arcs.csv");
        let nodes = customers.len() + depots.len();
        let arcs = if arcs_path.is_file() {
            self.load_arcs(&arcs_path, nodes)?
        } else if self.euclidean_fallback {
            let mut points = Vec::with_capacity(nodes);
            points.extend(customers.iter().map(|c| (c.x(), c.y())));
            points.extend(depots.iter().map(|d| (d.x(), d.y())));
            ArcMatrix::euclidean(&points)
        } else {
            return Err(InstanceLoadError::MissingFile(
                arcs_path.display().to_string(),
            ));
        };

        tracing::debug!(
            instance = name.as_str(),
            customers = customers.len(),
            depots = depots.len(),
            explicit_arcs = arcs_path.is_file(),
            "Loaded instance directory"
        );
        Ok(Instance::new(name, customers, depots, arcs)?)
    }

    fn load_customers(&self, path: &Path) -> Result<Vec<Customer>, InstanceLoadError> {
        let mut table = CsvTable::open(path)?;
        let mut out = Vec::new();
        while let Some(row) = table.next_row()? {
            let id = CustomerId::new(row.get_usize("id")?);
            let window = TimeWindow::new(row.get_f64("window_open")?, row.get_f64("window_close")?)
                .map_err(|e| InstanceLoadError::Instance(e.into()))?;
            let customer = Customer::new(
                id,
                row.get_f64("x")?,
                row.get_f64("y")?,
                row.get_f64("demand")?,
                row.get_f64("service_time")?,
                window,
            )
            .map_err(|e| InstanceLoadError::Instance(e.into()))?;
            out.push(customer);
        }
        Ok(out)
    }

    fn load_fleets(
        &self,
        path: &Path,
    ) -> Result<HashMap<usize, Vec<VehicleClass>>, InstanceLoadError> {
        let mut table = CsvTable::open(path)?;
        let mut fleets: HashMap<usize, Vec<VehicleClass>> = HashMap::new();
        while let Some(row) = table.next_row()? {
            let depot = row.get_usize("depot_id")?;
            let class = VehicleClass::new(
                VehicleTypeId::new(row.get_usize("type")?),
                row.get_usize("count")?,
                row.get_f64("capacity")?,
                row.get_f64("range")?,
                row.get_f64("speed")?,
                row.get_f64("fuel_time")?,
                row.get_f64("load_time")?,
                row.get_f64("stop_time")?,
                row.get_f64("max_shift")?,
                row.get_usize("max_routes")?,
                row.get_f64("cost_per_distance")?,
                row.get_f64("cost_per_time")?,
                row.get_f64("fixed_cost")?,
            )
            .map_err(|e| InstanceLoadError::Instance(e.into()))?;
            fleets.entry(depot).or_default().push(class);
        }
        Ok(fleets)
    }

    fn load_depots(
        &self,
        path: &Path,
        mut fleets: HashMap<usize, Vec<VehicleClass>>,
    ) -> Result<Vec<Depot>, InstanceLoadError> {
        let mut table = CsvTable::open(path)?;
        let mut out = Vec::new();
        while let Some(row) = table.next_row()? {
            let raw_id = row.get_usize("id")?;
            let window = TimeWindow::new(row.get_f64("window_open")?, row.get_f64("window_close")?)
                .map_err(|e| InstanceLoadError::Instance(e.into()))?;
            let fleet = fleets.remove(&raw_id).unwrap_or_default();
            let depot = Depot::new(
                DepotId::new(raw_id),
                row.get_f64("x")?,
                row.get_f64("y")?,
                row.get_f64("capacity")?,
                row.get_f64("cost_per_load")?,
                row.get_f64("fixed_cost")?,
                row.get_usize("mandatory")? != 0,
                row.get_f64("share_min")?,
                row.get_f64("share_max")?,
                window,
                fleet,
            )
            .map_err(|e| InstanceLoadError::Instance(e.into()))?;
            out.push(depot);
        }

        // Fleet rows naming a depot that never appeared are a data error.
        if let Some((&depot, _)) = fleets.iter().next() {
            return Err(InstanceLoadError::UnknownDepot {
                file: path.display().to_string(),
                line: 0,
                depot,
            });
        }
        Ok(out)
    }

    fn load_arcs(&self, path: &Path, nodes: usize) -> Result<ArcMatrix, InstanceLoadError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let file_name = path.display().to_string();
        let mut lengths = Vec::with_capacity(nodes * nodes);
        let mut line_no = 0usize;
        for line in reader.lines() {
            let line = line?;
            line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let fields: Vec<&str> = trimmed.split(',').collect();
            if fields.len() != nodes {
                return Err(InstanceLoadError::FieldCount {
                    file: file_name.clone(),
                    line: line_no,
                    expected: nodes,
                    actual: fields.len(),
                });
            }
            for field in fields {
                let v = field
                    .trim()
                    .parse::<f64>()
                    .map_err(|source| InstanceLoadError::ParseFloat {
                        file: file_name.clone(),
                        line: line_no,
                        source,
                    })?;
                lengths.push(v);
            }
        }
        Ok(ArcMatrix::from_flat(nodes, lengths)?)
    }
}

/// Minimal CSV reader: a header row of column names, comma-separated
/// fields, blank lines ignored.
struct CsvTable {
    file: String,
    reader: BufReader<File>,
    columns: HashMap<String, usize>,
    line_no: usize,
    buf: String,
}

struct CsvRow<'t> {
    file: &'t str,
    line_no: usize,
    columns: &'t HashMap<String, usize>,
    fields: Vec<String>,
}

impl CsvTable {
    fn open(path: &Path) -> Result<Self, InstanceLoadError> {
        let file_name = path.display().to_string();
        let file = File::open(path)
            .map_err(|_| InstanceLoadError::MissingFile(file_name.clone()))?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        reader.read_line(&mut header)?;
        let columns: HashMap<String, usize> = header
            .trim()
            .split(',')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        Ok(Self {
            file: file_name,
            reader,
            columns,
            line_no: 1,
            buf: String::new(),
        })
    }

    fn next_row(&mut self) -> Result<Option<CsvRow<'_>>, InstanceLoadError> {
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            let fields: Vec<String> = trimmed.split(',').map(|f| f.trim().to_string()).collect();
            if fields.len() != self.columns.len() {
                return Err(InstanceLoadError::FieldCount {
                    file: self.file.clone(),
                    line: self.line_no,
                    expected: self.columns.len(),
                    actual: fields.len(),
                });
            }
            return Ok(Some(CsvRow {
                file: &self.file,
                line_no: self.line_no,
                columns: &self.columns,
                fields,
            }));
        }
    }
}

impl CsvRow<'_> {
    fn field(&self, column: &'static str) -> Result<&str, InstanceLoadError> {
        let ix = self
            .columns
            .get(column)
            .ok_or(InstanceLoadError::MissingColumn {
                file: self.file.to_string(),
                column,
            })?;
        Ok(&self.fields[*ix])
    }

    fn get_f64(&self, column: &'static str) -> Result<f64, InstanceLoadError> {
        self.field(column)?
            .parse::<f64>()
            .map_err(|source| InstanceLoadError::ParseFloat {
                file: self.file.to_string(),
                line: self.line_no,
                source,
            })
    }

    fn get_usize(&self, column: &'static str) -> Result<usize, InstanceLoadError> {
        self.field(column)?
            .parse::<usize>()
            .map_err(|source| InstanceLoadError::ParseInt {
                file: self.file.to_string(),
                line: self.line_no,
                source,
            })
    }
}
