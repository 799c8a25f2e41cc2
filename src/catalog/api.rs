//! Versioned JSON API routes.
//!
//! Every route except `api_versions` starts with the `v<version>` segment.

use crate::routing::RouteSpec;

pub fn routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::path("", "api.versions", "api_versions"),
        RouteSpec::path("v<version>/", "api.base", "api_base"),
        // CSRF token, required in the header of POST/PUT/DELETE requests.
        RouteSpec::path("v<version>/token/", "api.token", "api_token"),
        RouteSpec::path("v<version>/servers/", "api.servers", "api_servers"),
        // POST username, password and server index.
        RouteSpec::path("v<version>/login/", "webgateway.login", "api_login"),
        // POST creates, PUT updates; json body.
        RouteSpec::path("v<version>/m/save/", "api.save", "api_save"),
        RouteSpec::path("v<version>/m/projects/", "api.projects", "api_projects"),
        // Literal parentheses, as declared by the owning system.
        RouteSpec::path("v<version>/m/projects/(<int:object_id>)/", "api.project", "api_project"),
        RouteSpec::path("v<version>/m/datasets/", "api.datasets", "api_datasets"),
        RouteSpec::path(
            "v<version>/m/projects/<int:project_id>/datasets/",
            "api.datasets",
            "api_project_datasets",
        ),
        RouteSpec::path("v<version>/m/datasets/<int:object_id>)/", "api.dataset", "api_dataset"),
        RouteSpec::path("v<version>/m/images/", "api.images", "api_images"),
        RouteSpec::path(
            "v<version>/m/datasets/<int:dataset_id>/images/",
            "api.images",
            "api_dataset_images",
        ),
        RouteSpec::path(
            "v<version>/m/datasets/<int:dataset_id>/projects/",
            "api.projects",
            "api_dataset_projects",
        ),
        RouteSpec::path("v<version>/m/images/<int:object_id>/", "api.image", "api_image"),
        RouteSpec::path(
            "v<version>/m/images/<int:image_id>/datasets/",
            "api.datasets",
            "api_image_datasets",
        ),
        RouteSpec::path("v<version>/m/screens/<int:object_id>/", "api.screen", "api_screen"),
        RouteSpec::path("v<version>/m/screens/", "api.screens", "api_screens"),
        RouteSpec::path("v<version>/m/plates/", "api.plates", "api_plates"),
        RouteSpec::path(
            "v<version>/m/screens/<int:screen_id>/plates/",
            "api.plates",
            "api_screen_plates",
        ),
        RouteSpec::path(
            "v<version>/m/wells/<int:well_id>/plates/",
            "api.plates",
            "api_well_plates",
        ),
        RouteSpec::path("v<version>/m/plates/<int:object_id>/", "api.plate", "api_plate"),
        RouteSpec::path("v<version>/m/wells/", "api.wells", "api_wells"),
        RouteSpec::path(
            "v<version>/m/plates/<int:plate_id>/plateacquisitions/",
            "api.plateacquisitions",
            "api_plate_plateacquisitions",
        ),
        RouteSpec::path(
            "v<version>/m/plateacquisitions/<int:object_id>/",
            "api.plateacquisition",
            "api_plateacquisition",
        ),
        RouteSpec::path(
            "v<version>/m/plateacquisitions/<int:plateacquisition_id>/wellsampleindex/<int:index>/wells/",
            "api.wells",
            "api_plateacquisition_wellsampleindex_wells",
        ),
        RouteSpec::path(
            "v<version>/m/plates/<int:plate_id>/wellsampleindex/<int:index>/wells/",
            "api.wells",
            "api_plate_wellsampleindex_wells",
        ),
        RouteSpec::path(
            "v<version>/m/plates/<int:plate_id>/wells/",
            "api.wells",
            "api_plate_wells",
        ),
        RouteSpec::path(
            "v<version>/m/plateacquisitions/<int:plateacquisition_id>/wells/",
            "api.wells",
            "api_plateacquisition_wells",
        ),
        RouteSpec::path("v<version>/m/wells/<int:object_id>/", "api.well", "api_well"),
        RouteSpec::path(
            "v<version>/m/plates/<int:plate_id>/screens/",
            "api.screens",
            "api_plate_screens",
        ),
        RouteSpec::path("v<version>/m/rois/", "api.rois", "api_rois"),
        RouteSpec::path("v<version>/m/rois/<int:object_id>/", "api.roi", "api_roi"),
        RouteSpec::path(
            "v<version>/m/images/<int:image_id>/rois/",
            "api.rois",
            "api_image_rois",
        ),
        RouteSpec::path("v<version>/m/experimenters/", "api.experimenters", "api_experimenters"),
        RouteSpec::path(
            "v<version>/m/experimenters/<int:object_id>/",
            "api.experimenter",
            "api_experimenter",
        ),
        RouteSpec::path(
            "v<version>/m/experimentergroups/<int:group_id>/experimenters/",
            "api.experimenters",
            "api_experimentergroup_experimenters",
        ),
        RouteSpec::path(
            "v<version>/m/experimentergroups/",
            "api.experimentergroups",
            "api_experimentergroups",
        ),
        RouteSpec::path(
            "v<version>/m/experimentergroups/<int:object_id>/",
            "api.experimentergroup",
            "api_experimentergroup",
        ),
        RouteSpec::path(
            "v<version>/m/experimenters/<int:experimenter_id>/experimentergroups/",
            "api.experimentergroups",
            "api_experimenter_experimentergroups",
        ),
    ]
}
