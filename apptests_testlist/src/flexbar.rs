// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Cases for the four seqan_flexbar tools: quality control, filtering, adapter removal and
// demultiplexing.  Every tool reads testsample.fq (or its multiplexed sibling) and writes
// one or more files that must match the gold_ files next to the fixtures.

use apptests_core::{BinarySpec, Programs, Result, Suite, TestConf, TestPathHelper};

pub struct SeqanFlexbar;

const BINARIES: [BinarySpec; 4] = [
    BinarySpec {
        subpath: "bin",
        name: "sflexQC",
    },
    BinarySpec {
        subpath: "bin",
        name: "sflexFilter",
    },
    BinarySpec {
        subpath: "bin",
        name: "sflexAR",
    },
    BinarySpec {
        subpath: "bin",
        name: "sflexDMulti",
    },
];

/// Sample names in barcodes.fa, plus the bucket for reads matching no barcode.
pub const DEMULTIPLEX_SAMPLES: [&str; 7] = [
    "Sample-1",
    "Sample26",
    "Sample-2",
    "Sample0",
    "Sample1458",
    "Sample37",
    "unidentified",
];

impl Suite for SeqanFlexbar {
    fn name(&self) -> &'static str {
        "seqan_flexbar"
    }

    fn tests_dir(&self) -> &'static str {
        "apps/seqan_flexbar/tests"
    }

    fn binaries(&self) -> &'static [BinarySpec] {
        &BINARIES
    }

    fn build_cases(&self, ph: &TestPathHelper, programs: &Programs) -> Result<Vec<TestConf>> {
        let mut cases = Vec::new();

        // Quality control: trim at quality 20, write FASTA.

        cases.push(
            TestConf::new(programs.get("sflexQC")?)
                .redir_stdout(ph.out_file("qc_test.stdout"))
                .arg(ph.in_file("testsample.fq"))
                .args(["-q", "20", "-o"])
                .arg(ph.out_file("qc_test.fa"))
                .args(["-t", "-ni"])
                .diff(ph.in_file("qc_test.stdout"), ph.out_file("qc_test.stdout"))
                .diff(ph.in_file("gold_qc_test.fa"), ph.out_file("qc_test.fa")),
        );

        // Length and window filtering.

        cases.push(
            TestConf::new(programs.get("sflexFilter")?)
                .redir_stdout(ph.out_file("filter_test.stdout"))
                .arg(ph.in_file("testsample.fq"))
                .args([
                    "-tl", "3", "-tr", "4", "-ml", "70", "-u", "1", "-s", "A", "-fl", "70",
                    "-ni", "-o",
                ])
                .arg(ph.out_file("filter_test.fq"))
                .diff(
                    ph.in_file("filter_test.stdout"),
                    ph.out_file("filter_test.stdout"),
                )
                .diff(ph.in_file("gold_filter_test.fq"), ph.out_file("filter_test.fq")),
        );

        // Adapter removal.

        cases.push(
            TestConf::new(programs.get("sflexAR")?)
                .redir_stdout(ph.out_file("ar_test.stdout"))
                .arg(ph.in_file("testsample.fq"))
                .arg("-a")
                .arg(ph.in_file("adapter.fa"))
                .arg("-o")
                .arg(ph.out_file("ar_test.fq"))
                .arg("-ni")
                .diff(ph.in_file("ar_test.stdout"), ph.out_file("ar_test.stdout"))
                .diff(ph.in_file("gold_ar_test.fq"), ph.out_file("ar_test.fq")),
        );

        // Demultiplexing.  The tool derives one output per sample from the -o name.

        let mut dmulti = TestConf::new(programs.get("sflexDMulti")?)
            .redir_stdout(ph.out_file("de_multi.stdout"))
            .arg(ph.in_file("testsample_multiplex.fq"))
            .arg("-b")
            .arg(ph.in_file("barcodes.fa"))
            .arg("-o")
            .arg(ph.out_file("test_de_multi.fq"))
            .arg("-ni")
            .diff(
                ph.in_file("gold_de_multi.stdout"),
                ph.out_file("de_multi.stdout"),
            );
        for sample in DEMULTIPLEX_SAMPLES {
            dmulti = dmulti.diff(
                ph.in_file(format!("gold_de_multi_{sample}.fq")),
                ph.out_file(format!("test_de_multi_{sample}.fq")),
            );
        }
        cases.push(dmulti);

        Ok(cases)
    }
}
