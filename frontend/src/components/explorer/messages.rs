use common::model::pivot::PivotConfig;
use common::model::row::Dataset;
use common::ExplorerError;

use crate::components::pivot::HeaderActivation;

pub enum Msg {
    // Data loading
    LoadFromServer,
    DefaultQueryLoaded(String),
    SetQueryText(String),
    RunQuery,
    LoadSample,
    OpenUploadDialog,
    FileSelected(web_sys::File),
    /// `notice` is the toast shown once the rows are in.
    DatasetLoaded { rows: Dataset, notice: String },
    LoadFailed(ExplorerError),

    // Pivot widget callbacks
    WidgetRefreshed(u64, PivotConfig),
    RenderSettled(u64),
    HeaderActivated(HeaderActivation),

    // Filter popover
    ToggleValue(String, bool),
    SelectAllValues,
    DeselectAllValues,
    SetMinInput(String),
    SetMaxInput(String),
    ApplyFilter,
    ClearFilter,
    CloseFilterEditor,

    // Configurations
    SaveConfiguration,
    OpenConfigSelector,
    CloseConfigSelector,
    LoadConfiguration(String),
    ClearAllConfigurations,
    ExportConfiguration,
    OpenImportDialog,
    ImportFileSelected(web_sys::File),
    ConfigurationFileRead(String),
    Reset,

    DownloadCsv,
    ToggleConsole,
    ClearConsole,
}
