use cellsheet_core::{
    chart_series, col_to_label, key_to_action, CellContent, CellCoord, CellError, CellRange,
    CellValue, ChartSeries, ConfigError, Effect, GridConfig, InputAction, Key, Modifiers, Sheet,
    SpreadsheetState,
};
use cellsheet_formula::{parse_cell_input, Evaluator};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Main spreadsheet engine exposed to JavaScript
#[wasm_bindgen]
pub struct SpreadsheetEngine {
    sheet: Sheet,
    state: SpreadsheetState,
    config: GridConfig,
}

/// Structured error object for JavaScript
#[derive(Serialize)]
pub struct JsCellsheetError {
    code: String,
    message: String,
}

impl From<&CellError> for JsCellsheetError {
    fn from(err: &CellError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<&ConfigError> for JsCellsheetError {
    fn from(err: &ConfigError) -> Self {
        Self {
            code: "INVALID_CONFIG".to_string(),
            message: err.to_string(),
        }
    }
}

fn to_js_error(err: impl Into<JsCellsheetError>) -> JsValue {
    serde_wasm_bindgen::to_value(&err.into()).unwrap_or(JsValue::NULL)
}

/// Cell data for JavaScript
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    /// Text to put back in the editor
    pub value: Option<String>,
    pub display_value: String,
    pub formula: Option<String>,
    /// Error code when the display value is an error marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    pub row: u32,
    pub col: u32,
}

/// Outcome of a keyboard or clipboard action
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub effect: Effect,
    /// Cells whose content changed, as `[row, col]`
    pub changed: Vec<[u32; 2]>,
}

#[wasm_bindgen]
impl SpreadsheetEngine {
    /// Create an engine with the default grid size
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(GridConfig::default())
    }

    /// Create an engine from a JSON config such as `{"width": 10, "height": 50}`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<SpreadsheetEngine, JsValue> {
        GridConfig::from_json(config_json)
            .map(Self::from_config)
            .map_err(|e| to_js_error(&e))
    }

    /// Grid dimensions as JSON
    #[wasm_bindgen(js_name = getDimensions)]
    pub fn get_dimensions(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_else(|_| "{}".to_string())
    }

    /// Header labels for every column, as a JSON array
    #[wasm_bindgen(js_name = getColumnLabels)]
    pub fn get_column_labels(&self) -> String {
        serde_json::to_string(&self.config.column_labels()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Letters for a zero-based column index
    #[wasm_bindgen(js_name = columnLabel)]
    pub fn column_label(col: u32) -> String {
        col_to_label(col)
    }

    /// Decode an A1 reference into `[row, col]`
    #[wasm_bindgen(js_name = parseReference)]
    pub fn parse_reference(text: &str) -> Result<Vec<u32>, JsValue> {
        CellCoord::from_a1(text)
            .map(|coord| vec![coord.row, coord.col])
            .map_err(|e| to_js_error(&e))
    }

    /// Parse and store raw input.
    /// Returns false when nothing was stored (blank input or off-grid cell).
    #[wasm_bindgen(js_name = setCellValue)]
    pub fn set_cell_value(&mut self, row: u32, col: u32, input: &str) -> bool {
        self.commit_input(CellCoord::new(row, col), input)
    }

    /// Get cell data for rendering
    #[wasm_bindgen(js_name = getCellData)]
    pub fn get_cell_data(&self, row: u32, col: u32) -> JsValue {
        let data = self.cell_data(CellCoord::new(row, col));
        serde_wasm_bindgen::to_value(&data).unwrap_or(JsValue::NULL)
    }

    /// Text shown in the grid for a cell; empty for an empty cell
    #[wasm_bindgen(js_name = getDisplayValue)]
    pub fn get_display_value(&self, row: u32, col: u32) -> String {
        self.display_value(CellCoord::new(row, col))
            .map(|value| value.as_text())
            .unwrap_or_default()
    }

    /// Non-empty cells in the visible window, as JSON
    #[wasm_bindgen(js_name = getViewportData)]
    pub fn get_viewport_data(
        &self,
        start_row: u32,
        end_row: u32,
        start_col: u32,
        end_col: u32,
    ) -> String {
        let range = CellRange::new(
            CellCoord::new(start_row, start_col),
            CellCoord::new(end_row, end_col),
        );
        let cells: Vec<CellData> = self
            .sheet
            .scan(range)
            .map(|(coord, _)| self.cell_data(coord))
            .collect();

        serde_json::to_string(&cells).unwrap_or_else(|_| "[]".to_string())
    }

    /// Empty a single cell. Returns whether it held content.
    #[wasm_bindgen(js_name = deleteCell)]
    pub fn delete_cell(&mut self, row: u32, col: u32) -> bool {
        self.sheet.delete(CellCoord::new(row, col)).is_some()
    }

    /// Place a line chart over `range` (A1 notation) at the given cell
    #[wasm_bindgen(js_name = insertChart)]
    pub fn insert_chart(&mut self, row: u32, col: u32, range: &str) -> Result<(), JsValue> {
        self.place_chart(CellCoord::new(row, col), range)
            .map_err(|e| to_js_error(&e))
    }

    /// Series of the chart at a cell as `[labels, values]` typed arrays.
    /// Empty when the cell holds no chart.
    #[wasm_bindgen(js_name = getChartSeries)]
    pub fn get_chart_series(&self, row: u32, col: u32) -> js_sys::Array {
        let result = js_sys::Array::new();
        if let Some(series) = self.chart_series_at(CellCoord::new(row, col)) {
            result.push(&js_sys::Float64Array::from(series.labels.as_slice()));
            result.push(&js_sys::Float64Array::from(series.values.as_slice()));
        }
        result
    }

    /// Handle a mouse click. Returns the outcome as JSON, or `null` off-grid.
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&mut self, row: u32, col: u32, shift: bool) -> String {
        let coord = CellCoord::new(row, col);
        if !self.config.contains(coord) {
            return "null".to_string();
        }

        // Leaving the editor stores what was typed
        if self.state.is_editing() {
            let effect = self.state.commit_edit();
            self.apply_effect(&effect);
        }

        let sheet = &self.sheet;
        let outcome = self.state.click(coord, Modifiers::new().with_shift(shift), |pos| {
            sheet
                .get(pos)
                .map(CellContent::original_input)
                .unwrap_or_default()
        });
        serde_json::to_string(&outcome).unwrap_or_else(|_| "null".to_string())
    }

    /// Handle a DOM key press, applying whatever it does to the sheet
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers::new()
            .with_shift(shift)
            .with_ctrl(ctrl)
            .with_alt(alt)
            .with_meta(meta);
        let action = key_to_action(Key::from_dom(key), modifiers);

        // While editing, the text field owns every key but Enter and Escape
        let action = match action {
            InputAction::ConfirmEdit | InputAction::Cancel => action,
            _ if self.state.is_editing() => InputAction::None,
            _ => action,
        };

        self.run_action(action)
    }

    /// Current selection as JSON (`null` when nothing is selected)
    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> String {
        serde_json::to_string(&self.state.selection.range()).unwrap_or_else(|_| "null".to_string())
    }

    /// Replace the text in the open editor. Returns false if no edit is open.
    #[wasm_bindgen(js_name = updateEdit)]
    pub fn update_edit(&mut self, text: &str) -> bool {
        self.state.edit.update(text)
    }

    /// Store the open editor's text
    #[wasm_bindgen(js_name = commitEdit)]
    pub fn commit_edit(&mut self) -> String {
        let effect = self.state.commit_edit();
        self.run_effect(effect)
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) {
        self.state.edit.cancel();
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    #[wasm_bindgen(js_name = copySelection)]
    pub fn copy_selection(&mut self) -> bool {
        self.run_action(InputAction::Copy);
        !self.state.clipboard.is_empty()
    }

    #[wasm_bindgen(js_name = cutSelection)]
    pub fn cut_selection(&mut self) -> bool {
        self.run_action(InputAction::Cut);
        !self.state.clipboard.is_empty()
    }

    /// Paste the clipboard at the selection's top-left cell
    pub fn paste(&mut self) -> String {
        self.run_action(InputAction::Paste)
    }
}

impl Default for SpreadsheetEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetEngine {
    pub fn from_config(config: GridConfig) -> Self {
        Self {
            sheet: Sheet::new(),
            state: SpreadsheetState::new(),
            config,
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Store typed input. Blank input leaves the cell as it was.
    fn commit_input(&mut self, coord: CellCoord, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        if !self.config.contains(coord) {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::error_1(
                &format!("[Cellsheet] Ignoring input for off-grid cell {}", coord).into(),
            );
            return false;
        }

        let content = parse_cell_input(input);

        #[cfg(target_arch = "wasm32")]
        if let CellContent::Formula(formula) = &content {
            if let Some(error) = &formula.error {
                web_sys::console::error_1(
                    &format!("[Formula Error] Cell {} formula '{}': {:?}", coord, input, error).into(),
                );
            }
        }

        self.sheet.set(coord, content);
        true
    }

    fn place_chart(&mut self, coord: CellCoord, range: &str) -> Result<(), CellError> {
        let range = CellRange::from_a1(range)?;
        if !self.config.contains(coord) {
            return Err(CellError::InvalidReference(coord.to_a1()));
        }
        self.sheet.set(coord, CellContent::Chart(range));
        Ok(())
    }

    fn chart_series_at(&self, coord: CellCoord) -> Option<ChartSeries> {
        match self.sheet.get(coord)? {
            CellContent::Chart(range) => Some(chart_series(&self.sheet, *range)),
            _ => None,
        }
    }

    fn display_value(&self, coord: CellCoord) -> Option<CellValue> {
        Evaluator::new(&self.sheet).evaluate_cell(coord)
    }

    fn cell_data(&self, coord: CellCoord) -> CellData {
        let content = self.sheet.get(coord);
        let value = self.display_value(coord);

        CellData {
            value: content.map(CellContent::original_input),
            display_value: value.as_ref().map(CellValue::as_text).unwrap_or_default(),
            formula: content
                .and_then(CellContent::as_formula)
                .map(|formula| formula.source.clone()),
            error: match &value {
                Some(CellValue::Error(e)) => Some(e.code().to_string()),
                _ => None,
            },
            chart: match content {
                Some(CellContent::Chart(range)) => Some(range.to_a1()),
                _ => None,
            },
            row: coord.row,
            col: coord.col,
        }
    }

    /// Empty the cut source, keeping cells whose destination is off the grid
    fn clear_moved_cells(&mut self, source: CellRange, anchor: CellCoord) -> Vec<CellCoord> {
        let shift = source.translate(source.start, anchor);
        let config = self.config;
        let moved: Vec<CellCoord> = self
            .sheet
            .scan(source)
            .map(|(coord, _)| coord)
            .filter(|from| shift(*from).is_some_and(|to| config.contains(to)))
            .collect();

        for coord in &moved {
            self.sheet.delete(*coord);
        }
        moved
    }

    fn run_action(&mut self, action: InputAction) -> String {
        let effect = self.state.handle_action(action, &self.config);
        self.run_effect(effect)
    }

    fn run_effect(&mut self, effect: Effect) -> String {
        let changed = self.apply_effect(&effect);

        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        if !changed.is_empty() {
            web_sys::console::log_1(
                &format!("[Cellsheet] {:?} changed {} cells", effect, changed.len()).into(),
            );
        }

        let result = ActionResult {
            effect,
            changed: changed.iter().map(|c| [c.row, c.col]).collect(),
        };
        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Apply an effect to the sheet, returning the cells it touched
    fn apply_effect(&mut self, effect: &Effect) -> Vec<CellCoord> {
        match effect {
            Effect::None | Effect::Redraw => Vec::new(),
            Effect::Clear { range } => self.sheet.clear_range(*range),
            Effect::Paste { source, anchor, cut } => {
                let snapshot = self.sheet.snapshot(*source);
                let mut changed = if *cut {
                    self.clear_moved_cells(*source, *anchor)
                } else {
                    Vec::new()
                };
                changed.extend(self.sheet.write_snapshot(
                    *source,
                    snapshot,
                    *anchor,
                    Some(&self.config),
                ));
                changed.sort();
                changed.dedup();
                changed
            }
            Effect::Commit { coord, input } => {
                if self.commit_input(*coord, input) {
                    vec![*coord]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
